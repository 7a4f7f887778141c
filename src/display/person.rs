//! Person display formatting

use crate::models::Person;
use crate::services::cpf;

/// Format a list of people as a table
pub fn format_person_list(people: &[Person], date_format: &str) -> String {
    if people.is_empty() {
        return "No people found.".to_string();
    }

    let name_width = people
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {}\n",
        "ID",
        "Name",
        "Birth Date",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:-<10}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for person in people {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {}\n",
            person.id.to_string(),
            person.name,
            person.birth_day().format(date_format),
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} people", people.len()));
    output
}

/// Indented lines describing one person and their parents
pub(crate) fn person_lines(person: &Person, date_format: &str, indent: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}Name:       {}\n", indent, person.name));
    output.push_str(&format!(
        "{}Born:       {}\n",
        indent,
        person.birth_day().format(date_format)
    ));

    let parents = [
        (
            "Father",
            &person.father_name,
            person.father_birth_date,
            &person.father_cpf,
        ),
        (
            "Mother",
            &person.mother_name,
            person.mother_birth_date,
            &person.mother_cpf,
        ),
    ];

    for (role, name, born, parent_cpf) in parents {
        if name.is_none() && born.is_none() && parent_cpf.is_none() {
            continue;
        }
        let mut line = format!("{}{}:", indent, role);
        line.push_str(&" ".repeat(12 - role.len() - 1));
        line.push_str(name.as_deref().unwrap_or("-"));
        if let Some(born) = born {
            line.push_str(&format!(", born {}", born.date_naive().format(date_format)));
        }
        if let Some(value) = parent_cpf {
            line.push_str(&format!(", CPF {}", cpf::format(value)));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a person's details, with the records that refer to them
pub fn format_person_details(person: &Person, references: &[String], date_format: &str) -> String {
    let mut output = format!("Person {}\n", person.id);
    output.push_str(&person_lines(person, date_format, "  "));
    output.push_str(&format!("  ID:         {}\n", person.id.as_uuid()));

    if references.is_empty() {
        output.push_str("  Records:    none\n");
    } else {
        output.push_str(&format!("  Records:    {}\n", references.join(", ")));
    }

    output
}

//! Form flags shared by the `add` commands
//!
//! Every field is optional on the command line so that a missing value is
//! reported by the field rules with the rest of the form, not by clap. Dates
//! that cannot be read are passed on as invalid for the same reason.

use clap::Args;

use crate::models::{FormDate, PersonForm};

/// Raw flag values for one person
struct PersonFlags<'a> {
    name: &'a Option<String>,
    birth_date: &'a Option<String>,
    father_name: &'a Option<String>,
    mother_name: &'a Option<String>,
    father_birth_date: &'a Option<String>,
    mother_birth_date: &'a Option<String>,
    father_cpf: &'a Option<String>,
    mother_cpf: &'a Option<String>,
}

impl PersonFlags<'_> {
    fn to_form(&self) -> PersonForm {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        PersonForm {
            name: text(self.name),
            birth_date: FormDate::from_input(self.birth_date.as_deref()),
            father_name: text(self.father_name),
            mother_name: text(self.mother_name),
            father_birth_date: FormDate::from_input(self.father_birth_date.as_deref()),
            mother_birth_date: FormDate::from_input(self.mother_birth_date.as_deref()),
            father_cpf: text(self.father_cpf),
            mother_cpf: text(self.mother_cpf),
        }
    }
}

/// The registrant of a birth or the deceased of a death
#[derive(Args, Debug)]
pub struct PersonArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Father's name
    #[arg(long)]
    pub father_name: Option<String>,

    /// Mother's name
    #[arg(long)]
    pub mother_name: Option<String>,

    /// Father's birth date
    #[arg(long)]
    pub father_birth_date: Option<String>,

    /// Mother's birth date
    #[arg(long)]
    pub mother_birth_date: Option<String>,

    /// Father's CPF, masked or digits only
    #[arg(long)]
    pub father_cpf: Option<String>,

    /// Mother's CPF, masked or digits only
    #[arg(long)]
    pub mother_cpf: Option<String>,
}

impl PersonArgs {
    pub fn to_form(&self) -> PersonForm {
        PersonFlags {
            name: &self.name,
            birth_date: &self.birth_date,
            father_name: &self.father_name,
            mother_name: &self.mother_name,
            father_birth_date: &self.father_birth_date,
            mother_birth_date: &self.mother_birth_date,
            father_cpf: &self.father_cpf,
            mother_cpf: &self.mother_cpf,
        }
        .to_form()
    }
}

/// Both spouses of a marriage
#[derive(Args, Debug)]
pub struct SpouseArgs {
    #[arg(long)]
    pub spouse1_name: Option<String>,
    #[arg(long)]
    pub spouse1_birth_date: Option<String>,
    #[arg(long)]
    pub spouse1_father_name: Option<String>,
    #[arg(long)]
    pub spouse1_mother_name: Option<String>,
    #[arg(long)]
    pub spouse1_father_birth_date: Option<String>,
    #[arg(long)]
    pub spouse1_mother_birth_date: Option<String>,
    #[arg(long)]
    pub spouse1_father_cpf: Option<String>,
    #[arg(long)]
    pub spouse1_mother_cpf: Option<String>,

    #[arg(long)]
    pub spouse2_name: Option<String>,
    #[arg(long)]
    pub spouse2_birth_date: Option<String>,
    #[arg(long)]
    pub spouse2_father_name: Option<String>,
    #[arg(long)]
    pub spouse2_mother_name: Option<String>,
    #[arg(long)]
    pub spouse2_father_birth_date: Option<String>,
    #[arg(long)]
    pub spouse2_mother_birth_date: Option<String>,
    #[arg(long)]
    pub spouse2_father_cpf: Option<String>,
    #[arg(long)]
    pub spouse2_mother_cpf: Option<String>,
}

impl SpouseArgs {
    pub fn spouse1(&self) -> PersonForm {
        PersonFlags {
            name: &self.spouse1_name,
            birth_date: &self.spouse1_birth_date,
            father_name: &self.spouse1_father_name,
            mother_name: &self.spouse1_mother_name,
            father_birth_date: &self.spouse1_father_birth_date,
            mother_birth_date: &self.spouse1_mother_birth_date,
            father_cpf: &self.spouse1_father_cpf,
            mother_cpf: &self.spouse1_mother_cpf,
        }
        .to_form()
    }

    pub fn spouse2(&self) -> PersonForm {
        PersonFlags {
            name: &self.spouse2_name,
            birth_date: &self.spouse2_birth_date,
            father_name: &self.spouse2_father_name,
            mother_name: &self.spouse2_mother_name,
            father_birth_date: &self.spouse2_father_birth_date,
            mother_birth_date: &self.spouse2_mother_birth_date,
            father_cpf: &self.spouse2_father_cpf,
            mother_cpf: &self.spouse2_mother_cpf,
        }
        .to_form()
    }
}

use super::account::{Account, AccountId, AccountType, Label};

pub const MAX_LABEL_INPUT: usize = 50;
pub const MAX_LOGIN: usize = 100;
pub const MAX_PASSWORD: usize = 100;

const LABEL_SEPARATOR: char = ';';

/// Splits the label field on `;`, dropping blank entries
pub fn parse_labels(input: &str) -> Vec<Label> {
    input
        .split(LABEL_SEPARATOR)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(Label::new)
        .collect()
}

/// Label field text as the user sees it
pub fn format_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| label.text.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw values typed into one account row
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub labels: String,
    pub account_type: AccountType,
    pub login: String,
    pub password: Option<String>,
}

impl FormInput {
    /// Builds the full record for `id`. Fields left out of the form come back at
    /// their blank values, and `is_valid` is recomputed.
    pub fn into_account(self, id: AccountId) -> Account {
        let password = match self.account_type {
            AccountType::Ldap => None,
            AccountType::Local => Some(self.password.unwrap_or_default()),
        };

        let mut account = Account {
            id,
            label: parse_labels(&self.labels),
            account_type: self.account_type,
            login: self.login.trim().to_string(),
            password,
            is_valid: false,
        };
        account.is_valid = validate(&account);
        account
    }
}

impl From<&Account> for FormInput {
    fn from(account: &Account) -> Self {
        Self {
            labels: format_labels(&account.label),
            account_type: account.account_type,
            login: account.login.clone(),
            password: account.password.clone(),
        }
    }
}

pub fn validate(account: &Account) -> bool {
    let labels_ok = format_labels(&account.label).chars().count() <= MAX_LABEL_INPUT;
    let login_ok = !account.login.is_empty() && account.login.chars().count() <= MAX_LOGIN;

    let password_ok = match account.account_type {
        AccountType::Ldap => true,
        AccountType::Local => match &account.password {
            Some(password) => !password.is_empty() && password.chars().count() <= MAX_PASSWORD,
            None => false,
        },
    };

    labels_ok && login_ok && password_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn texts(labels: &[Label]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test_case("", &[] ; "empty")]
    #[test_case("ops", &["ops"] ; "single")]
    #[test_case("ops; prod ;dev", &["ops", "prod", "dev"] ; "keeps order and trims")]
    #[test_case(" ; ops;; ", &["ops"] ; "drops blanks")]
    fn parses_labels(input: &str, expected: &[&str]) {
        assert_eq!(texts(&parse_labels(input)), expected);
    }

    #[test]
    fn formats_labels_back_to_field_text() {
        let labels = parse_labels("ops;prod");
        assert_eq!(format_labels(&labels), "ops; prod");
    }

    #[test]
    fn ldap_account_drops_password() {
        let account = FormInput {
            labels: "corp".to_string(),
            account_type: AccountType::Ldap,
            login: "jdoe".to_string(),
            password: Some("ignored".to_string()),
        }
        .into_account(AccountId::new(4));

        assert_eq!(account.id, AccountId::new(4));
        assert_eq!(account.password, None);
        assert!(account.is_valid);
    }

    #[test]
    fn omitted_fields_come_back_blank() {
        let account = FormInput::default().into_account(AccountId::new(1));

        assert_eq!(account, Account::new(AccountId::new(1)));
    }

    #[test_case(AccountType::Local, "jdoe", Some("secret"), true ; "local complete")]
    #[test_case(AccountType::Local, "jdoe", Some(""), false ; "local empty password")]
    #[test_case(AccountType::Local, "jdoe", None, false ; "local absent password")]
    #[test_case(AccountType::Local, "", Some("secret"), false ; "missing login")]
    #[test_case(AccountType::Ldap, "jdoe", None, true ; "ldap without password")]
    #[test_case(AccountType::Ldap, "", None, false ; "ldap missing login")]
    fn validates_required_fields(
        account_type: AccountType,
        login: &str,
        password: Option<&str>,
        expected: bool,
    ) {
        let account = Account {
            account_type,
            login: login.to_string(),
            password: password.map(str::to_string),
            ..Account::new(AccountId::new(1))
        };

        assert_eq!(validate(&account), expected);
    }

    #[test]
    fn rejects_overlong_fields() {
        let base = Account {
            login: "jdoe".to_string(),
            password: Some("secret".to_string()),
            ..Account::new(AccountId::new(1))
        };
        assert!(validate(&base));

        let long_labels = Account {
            label: parse_labels(&"x".repeat(MAX_LABEL_INPUT + 1)),
            ..base.clone()
        };
        let long_login = Account {
            login: "x".repeat(MAX_LOGIN + 1),
            ..base.clone()
        };
        let long_password = Account {
            password: Some("x".repeat(MAX_PASSWORD + 1)),
            ..base
        };

        assert!(!validate(&long_labels));
        assert!(!validate(&long_login));
        assert!(!validate(&long_password));
    }

    #[test]
    fn form_input_reflects_account() {
        let account = FormInput {
            labels: "a;b".to_string(),
            account_type: AccountType::Local,
            login: "jdoe".to_string(),
            password: Some("pw".to_string()),
        }
        .into_account(AccountId::new(2));

        let input = FormInput::from(&account);

        assert_eq!(input.labels, "a; b");
        assert_eq!(input.login, "jdoe");
        assert_eq!(input.into_account(AccountId::new(2)), account);
    }
}

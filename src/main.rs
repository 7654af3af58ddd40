use std::{io, path::PathBuf, process};
#[macro_use]
extern crate log;

use account_form_store::features::{
    format_labels, Account, AccountId, AccountType, FileStorage, FormInput, Store,
    DEFAULT_STORAGE_KEY,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Manage account records persisted in a key-value storage file
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// File backing the key-value storage
    #[clap(short, long, default_value = "accounts.json")]
    storage: PathBuf,

    /// Key the account list is stored under
    #[clap(short, long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a blank account and print its id
    Add,

    /// Delete an account. Unknown ids are ignored
    Delete { id: u32 },

    /// Replace an account with the given form values. Omitted fields are reset
    Update {
        id: u32,

        /// Labels separated by `;`
        #[clap(long, default_value = "")]
        labels: String,

        /// LDAP or Local
        #[clap(long = "type", default_value = "Local")]
        account_type: AccountType,

        #[clap(long, default_value = "")]
        login: String,

        #[clap(long)]
        password: Option<String>,
    },

    /// Print all accounts as CSV
    List {
        #[clap(long)]
        show_passwords: bool,
    },
}

#[derive(Serialize)]
struct Row<'a> {
    id: AccountId,
    #[serde(rename = "type")]
    account_type: AccountType,
    labels: String,
    login: &'a str,
    password: String,
    #[serde(rename = "isValid")]
    is_valid: bool,
}

impl<'a> Row<'a> {
    fn new(account: &'a Account, show_passwords: bool) -> Self {
        let password = match &account.password {
            Some(password) if show_passwords => password.clone(),
            Some(password) if !password.is_empty() => "********".to_string(),
            _ => String::new(),
        };

        Self {
            id: account.id,
            account_type: account.account_type,
            labels: format_labels(&account.label),
            login: &account.login,
            password,
            is_valid: account.is_valid,
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let storage = FileStorage::new(&cli.storage);
    let mut store = Store::with_key(storage, cli.key);

    store
        .load_accounts()
        .with_context(|| format!("Unable to load accounts from {}", cli.storage.display()))?;

    match cli.command {
        Command::Add => {
            let id = store.add_account()?.id;
            println!("{id}");
        }
        Command::Delete { id } => {
            let id = AccountId::new(id);
            if store.get(id).is_none() {
                warn!("account {id} does not exist");
            }
            store.delete_account(id);
        }
        Command::Update {
            id,
            labels,
            account_type,
            login,
            password,
        } => {
            let id = AccountId::new(id);
            if store.get(id).is_none() {
                warn!("account {id} does not exist");
            }

            let account = FormInput {
                labels,
                account_type,
                login,
                password,
            }
            .into_account(id);
            if !account.is_valid {
                warn!("account {id} saved with invalid fields");
            }
            store.update_account(account);
        }
        Command::List { show_passwords } => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for account in store.accounts() {
                wtr.serialize(Row::new(account, show_passwords))?;
            }
            wtr.flush()?;
            return Ok(());
        }
    }

    store
        .save_accounts()
        .with_context(|| format!("Unable to save accounts to {}", cli.storage.display()))?;

    Ok(())
}

use clap::{Args as ClapArgs, Parser, Subcommand};
use fintrack_core::api::TransactionKind;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Entrada,
    Saida,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Entrada => TransactionKind::Entrada,
            KindArg::Saida => TransactionKind::Saida,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fintrack", about = "Personal finance client over the fintrack backend")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the configured backend base URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and persist the session.
    Login(LoginArgs),
    /// Multi-step registration in one call; fields accumulate in the draft
    /// the same way the sign-up screens fill it.
    Register(RegisterArgs),
    /// Clear the persisted session.
    Logout,
    /// Show the signed-in profile.
    Profile,
    /// Transactions.
    #[command(subcommand)]
    Tx(TxCommands),
    /// Per-category monthly budgets.
    #[command(subcommand)]
    Budget(BudgetCommands),
    /// List the category catalogue.
    Categories,
}

#[derive(ClapArgs, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(ClapArgs, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    pub birth_date: Option<String>,
    /// Savings objective. Can be given multiple times.
    #[arg(long = "objective", action = clap::ArgAction::Append)]
    pub objectives: Vec<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// List transactions, optionally narrowed to a display month
    /// ("Junho", client-side) or a backend period ("2024-06").
    List {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        period: Option<String>,
    },
    Add(AddTxArgs),
    Edit(EditTxArgs),
    /// Delete a transaction.
    Rm {
        id: String,
    },
    /// Income/expense totals.
    Summary,
}

#[derive(ClapArgs, Debug)]
pub struct AddTxArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub amount: f64,
    #[arg(long, value_enum)]
    pub kind: KindArg,
    #[arg(long)]
    pub category: String,
}

#[derive(ClapArgs, Debug)]
pub struct EditTxArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub amount: Option<f64>,
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// List budgets, optionally for one period ("2024-06").
    List {
        #[arg(long)]
        period: Option<String>,
    },
    Add(AddBudgetArgs),
    Edit(EditBudgetArgs),
    Rm {
        id: String,
    },
    /// Consumption status per budget for a period.
    Status {
        #[arg(long)]
        period: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct AddBudgetArgs {
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub limit: f64,
    /// Calendar year-month, YYYY-MM.
    #[arg(long)]
    pub period: String,
}

#[derive(ClapArgs, Debug)]
pub struct EditBudgetArgs {
    pub id: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub limit: Option<f64>,
    #[arg(long)]
    pub period: Option<String>,
}

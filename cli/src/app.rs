//! Command dispatch over the wired AppContext.

use anyhow::Context as _;
use fintrack_core::api::{
    self as core_api, AppContext, BudgetInput, BudgetPatch, PeriodFilter, Session,
    TransactionInput, TransactionPatch,
};

use crate::commands::cli::{
    AddBudgetArgs, AddTxArgs, BudgetCommands, Commands, EditBudgetArgs, EditTxArgs, LoginArgs,
    RegisterArgs, TxCommands,
};

pub async fn dispatch(cmd: Commands, ctx: &AppContext) -> anyhow::Result<i32> {
    match cmd {
        Commands::Login(args) => login(args, ctx).await,
        Commands::Register(args) => register(args, ctx).await,
        Commands::Logout => logout(ctx).await,
        Commands::Profile => profile(ctx).await,
        Commands::Tx(cmd) => transactions(cmd, ctx).await,
        Commands::Budget(cmd) => budgets(cmd, ctx).await,
        Commands::Categories => categories(ctx).await,
    }
}

fn require_session(ctx: &AppContext) -> anyhow::Result<Session> {
    ctx.session()
        .current()
        .context("Nenhuma sessão ativa. Use `fintrack login`.")
}

async fn login(args: LoginArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    let session = ctx
        .auth_hook()
        .login(&core_api::Credentials {
            email: args.email,
            password: args.password,
        })
        .await?;
    let name = session.identity.name.clone();
    ctx.session().sign_in(session).await?;
    println!("Sessão iniciada para {name}.");
    Ok(0)
}

async fn register(args: RegisterArgs, ctx: &AppContext) -> anyhow::Result<i32> {
    // Fill the draft the way the sign-up screens do, one field at a time;
    // `finish` validates before anything is sent.
    let draft = ctx.registration();
    if let Some(name) = args.name {
        draft.set_name(name);
    }
    if let Some(raw) = args.birth_date {
        let date = raw
            .parse::<chrono::NaiveDate>()
            .context("data de nascimento inválida, use YYYY-MM-DD")?;
        draft.set_birth_date(date);
    }
    if !args.objectives.is_empty() {
        draft.set_objectives(args.objectives);
    }
    if let Some(email) = args.email {
        draft.set_email(email);
    }
    if let Some(password) = args.password {
        draft.set_password(password);
    }

    let session = draft.finish(&ctx.auth_hook()).await?;
    let name = session.identity.name.clone();
    ctx.session().sign_in(session).await?;
    println!("Conta criada. Sessão iniciada para {name}.");
    Ok(0)
}

async fn logout(ctx: &AppContext) -> anyhow::Result<i32> {
    ctx.session().sign_out().await?;
    println!("Sessão encerrada.");
    Ok(0)
}

async fn profile(ctx: &AppContext) -> anyhow::Result<i32> {
    let session = require_session(ctx)?;
    let identity = ctx
        .auth_hook()
        .fetch_profile(&session.access_token)
        .await?;
    println!("{} <{}>", identity.name, identity.email);
    Ok(0)
}

async fn transactions(cmd: TxCommands, ctx: &AppContext) -> anyhow::Result<i32> {
    let hook = ctx.transactions_hook();
    match cmd {
        TxCommands::List { month, period } => {
            let filter = period.map(|month| PeriodFilter { month });
            let all = hook.fetch(filter.as_ref()).await?;
            let rows: Vec<&core_api::Transaction> = match month.as_deref() {
                Some(month) => core_api::transactions_of_month(&all, month),
                None => all.iter().collect(),
            };
            for tx in rows {
                let sign = match tx.kind {
                    core_api::TransactionKind::Entrada => '+',
                    core_api::TransactionKind::Saida => '-',
                };
                println!(
                    "{}  {}  {}R${:.2}  [{}]",
                    tx.created_at.format("%Y-%m-%d"),
                    tx.title,
                    sign,
                    tx.amount,
                    tx.id
                );
            }
        }
        TxCommands::Add(AddTxArgs {
            title,
            amount,
            kind,
            category,
        }) => {
            let tx = hook
                .create(&TransactionInput {
                    title,
                    amount,
                    kind: kind.into(),
                    category_id: category,
                })
                .await?;
            println!("Transação criada: {}", tx.id);
        }
        TxCommands::Edit(EditTxArgs {
            id,
            title,
            amount,
            kind,
            category,
        }) => {
            let patch = TransactionPatch {
                title,
                amount,
                kind: kind.map(Into::into),
                category_id: category,
            };
            let tx = hook.update(&id, &patch).await?;
            println!("Transação atualizada: {}", tx.id);
        }
        TxCommands::Rm { id } => {
            hook.delete(&id).await?;
            println!("Transação removida: {id}");
        }
        TxCommands::Summary => {
            let summary = hook.fetch_summary().await?;
            println!("Entradas:  R${:.2}", summary.total_income);
            println!("Saídas:    R${:.2}", summary.total_expense);
            println!("Saldo:     R${:.2}", summary.balance);
        }
    }
    Ok(0)
}

async fn budgets(cmd: BudgetCommands, ctx: &AppContext) -> anyhow::Result<i32> {
    let hook = ctx.budgets_hook();
    match cmd {
        BudgetCommands::List { period } => {
            let filter = period.map(|month| PeriodFilter { month });
            for budget in hook.fetch(filter.as_ref()).await? {
                println!(
                    "{}  {}  limite R${:.2}  [{}]",
                    budget.period, budget.category_id, budget.limit, budget.id
                );
            }
        }
        BudgetCommands::Add(AddBudgetArgs {
            category,
            limit,
            period,
        }) => {
            let budget = hook
                .create(&BudgetInput {
                    category_id: category,
                    limit,
                    period,
                })
                .await?;
            println!("Orçamento criado: {}", budget.id);
        }
        BudgetCommands::Edit(EditBudgetArgs {
            id,
            category,
            limit,
            period,
        }) => {
            let patch = BudgetPatch {
                category_id: category,
                limit,
                period,
            };
            let budget = hook.update(&id, &patch).await?;
            println!("Orçamento atualizado: {}", budget.id);
        }
        BudgetCommands::Rm { id } => {
            hook.delete(&id).await?;
            println!("Orçamento removido: {id}");
        }
        BudgetCommands::Status { period } => {
            let filter = period.map(|month| PeriodFilter { month });
            for budget in hook.fetch(filter.as_ref()).await? {
                let usage = core_api::budget_usage(&budget);
                println!(
                    "{}  limite R${:.2}  {}",
                    budget.category_id,
                    budget.limit,
                    core_api::usage_label(&usage)
                );
            }
        }
    }
    Ok(0)
}

async fn categories(ctx: &AppContext) -> anyhow::Result<i32> {
    for category in ctx.categories_hook().fetch().await? {
        println!("{}  {}", category.id, category.name);
    }
    Ok(0)
}

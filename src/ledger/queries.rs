//! Ledger SQL statements
//!
//! Each statement is written once against [`PgExecutor`] so the same code
//! runs on the pool and inside an open transaction.

use sqlx::PgExecutor;

use super::error::StoreError;
use super::models::{
    Account, AddAccountBalanceParams, CreateAccountParams, CreateEntryParams,
    CreateTransferParams, Entry, ListEntriesParams, ListTransfersParams, Transfer,
};

pub async fn create_account<'e, E>(
    executor: E,
    params: &CreateAccountParams,
) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (owner, balance, currency)
        VALUES ($1, $2, $3)
        RETURNING id, owner, balance, currency, created_at
        "#,
    )
    .bind(&params.owner)
    .bind(params.balance)
    .bind(params.currency.as_str())
    .fetch_one(executor)
    .await?;

    Ok(account)
}

pub async fn get_account<'e, E>(executor: E, id: i64) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let account = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, owner, balance, currency, created_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(executor)
    .await?;

    Ok(account)
}

/// `UPDATE ... SET balance = balance + $1` takes the row lock and reads the
/// latest committed balance under it.
pub async fn add_account_balance<'e, E>(
    executor: E,
    params: AddAccountBalanceParams,
) -> Result<Account, StoreError>
where
    E: PgExecutor<'e>,
{
    let account = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET balance = balance + $1
        WHERE id = $2
        RETURNING id, owner, balance, currency, created_at
        "#,
    )
    .bind(params.amount)
    .bind(params.id)
    .fetch_one(executor)
    .await?;

    Ok(account)
}

pub async fn create_entry<'e, E>(executor: E, params: CreateEntryParams) -> Result<Entry, StoreError>
where
    E: PgExecutor<'e>,
{
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        INSERT INTO entries (account_id, amount)
        VALUES ($1, $2)
        RETURNING id, account_id, amount, created_at
        "#,
    )
    .bind(params.account_id)
    .bind(params.amount)
    .fetch_one(executor)
    .await?;

    Ok(entry)
}

pub async fn get_entry<'e, E>(executor: E, id: i64) -> Result<Entry, StoreError>
where
    E: PgExecutor<'e>,
{
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, account_id, amount, created_at
        FROM entries
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(executor)
    .await?;

    Ok(entry)
}

pub async fn list_entries<'e, E>(
    executor: E,
    params: ListEntriesParams,
) -> Result<Vec<Entry>, StoreError>
where
    E: PgExecutor<'e>,
{
    let entries = sqlx::query_as::<_, Entry>(
        r#"
        SELECT id, account_id, amount, created_at
        FROM entries
        WHERE account_id = $1
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(params.account_id)
    .bind(params.limit)
    .bind(params.offset)
    .fetch_all(executor)
    .await?;

    Ok(entries)
}

pub async fn create_transfer<'e, E>(
    executor: E,
    params: CreateTransferParams,
) -> Result<Transfer, StoreError>
where
    E: PgExecutor<'e>,
{
    let transfer = sqlx::query_as::<_, Transfer>(
        r#"
        INSERT INTO transfers (from_account_id, to_account_id, amount)
        VALUES ($1, $2, $3)
        RETURNING id, from_account_id, to_account_id, amount, created_at
        "#,
    )
    .bind(params.from_account_id)
    .bind(params.to_account_id)
    .bind(params.amount)
    .fetch_one(executor)
    .await?;

    Ok(transfer)
}

pub async fn get_transfer<'e, E>(executor: E, id: i64) -> Result<Transfer, StoreError>
where
    E: PgExecutor<'e>,
{
    let transfer = sqlx::query_as::<_, Transfer>(
        r#"
        SELECT id, from_account_id, to_account_id, amount, created_at
        FROM transfers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_one(executor)
    .await?;

    Ok(transfer)
}

pub async fn list_transfers<'e, E>(
    executor: E,
    params: ListTransfersParams,
) -> Result<Vec<Transfer>, StoreError>
where
    E: PgExecutor<'e>,
{
    let transfers = sqlx::query_as::<_, Transfer>(
        r#"
        SELECT id, from_account_id, to_account_id, amount, created_at
        FROM transfers
        WHERE from_account_id = $1 OR to_account_id = $2
        ORDER BY id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(params.from_account_id)
    .bind(params.to_account_id)
    .bind(params.limit)
    .bind(params.offset)
    .fetch_all(executor)
    .await?;

    Ok(transfers)
}

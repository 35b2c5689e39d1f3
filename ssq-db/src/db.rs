use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::path::Path;

use crate::models::{DrawRecord, WinnerDetail};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    issue             TEXT PRIMARY KEY,
    open_time         TEXT NOT NULL,
    week              TEXT NOT NULL DEFAULT '',
    front_1           INTEGER NOT NULL,
    front_2           INTEGER NOT NULL,
    front_3           INTEGER NOT NULL,
    front_4           INTEGER NOT NULL,
    front_5           INTEGER NOT NULL,
    front_6           INTEGER NOT NULL,
    back              INTEGER NOT NULL,
    front_draw_order  TEXT NOT NULL DEFAULT '',
    back_draw_order   TEXT NOT NULL DEFAULT '',
    sale_money        INTEGER NOT NULL DEFAULT 0,
    r9_sale_money     INTEGER NOT NULL DEFAULT 0,
    prize_pool_money  INTEGER NOT NULL DEFAULT 0,
    winner_details    TEXT NOT NULL DEFAULT '[]'
);
";

const SELECT_COLUMNS: &str = "SELECT issue, open_time, week, front_1, front_2, front_3, front_4, front_5, front_6, back,
        front_draw_order, back_draw_order, sale_money, r9_sale_money, prize_pool_money, winner_details
 FROM draws";

/// Year, then period as a number, so `20251000` sorts after `2025999`.
const NEWEST_FIRST: &str =
    "ORDER BY CAST(substr(issue, 1, 4) AS INTEGER) DESC, CAST(substr(issue, 5) AS INTEGER) DESC";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("ssq.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("cannot open database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("migration failed")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &DrawRecord) -> Result<bool> {
    let winner_details = serde_json::to_string(&draw.winner_details)
        .context("cannot serialize winner details")?;
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (issue, open_time, week, front_1, front_2, front_3, front_4, front_5, front_6, back,
                                      front_draw_order, back_draw_order, sale_money, r9_sale_money, prize_pool_money, winner_details)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        rusqlite::params![
            draw.issue,
            draw.open_time,
            draw.week,
            draw.front[0],
            draw.front[1],
            draw.front[2],
            draw.front[3],
            draw.front[4],
            draw.front[5],
            draw.back,
            draw.front_draw_order,
            draw.back_draw_order,
            draw.sale_money,
            draw.r9_sale_money,
            draw.prize_pool_money,
            winner_details,
        ],
    ).context("insert failed")?;
    Ok(changed > 0)
}

fn draw_from_row(row: &Row<'_>) -> rusqlite::Result<DrawRecord> {
    let details_json: String = row.get(15)?;
    let winner_details: Vec<WinnerDetail> = serde_json::from_str(&details_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(15, Type::Text, Box::new(e)))?;
    Ok(DrawRecord {
        issue: row.get(0)?,
        open_time: row.get(1)?,
        week: row.get(2)?,
        front: [
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
            row.get::<_, u8>(8)?,
        ],
        back: row.get(9)?,
        front_draw_order: row.get(10)?,
        back_draw_order: row.get(11)?,
        sale_money: row.get(12)?,
        r9_sale_money: row.get(13)?,
        prize_pool_money: row.get(14)?,
        winner_details,
    })
}

/// Latest `limit` draws, newest first.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} {NEWEST_FIRST} LIMIT ?1"))?;
    let draws = stmt
        .query_map([limit], draw_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

/// Whole history, newest first.
pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} {NEWEST_FIRST}"))?;
    let draws = stmt
        .query_map([], draw_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

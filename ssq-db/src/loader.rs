use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::RecordError;
use crate::models::{validate_draw, DrawRecord, Pool, WinnerDetail};

/// A history entry as published: numbers are space separated text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawRecord {
    issue: String,
    open_time: String,
    front_winning_num: String,
    back_winning_num: String,
    seq_front_winning_num: String,
    seq_back_winning_num: String,
    sale_money: String,
    r9_sale_money: String,
    prize_pool_money: String,
    week: String,
    winner_details: Vec<WinnerDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    File(PathBuf),
    Sample,
}

impl std::fmt::Display for HistorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistorySource::File(path) => write!(f, "{}", path.display()),
            HistorySource::Sample => write!(f, "built-in sample"),
        }
    }
}

fn parse_number(issue: &str, token: &str, pool: Pool) -> Result<u8, RecordError> {
    let value: i64 = token.parse().map_err(|_| RecordError::InvalidRecordFormat {
        issue: issue.to_string(),
        reason: format!("cannot parse {} number '{}'", pool, token),
    })?;
    if value < 1 || value > pool.size() as i64 {
        return Err(RecordError::NumberOutOfRange {
            issue: issue.to_string(),
            pool,
            value,
        });
    }
    Ok(value as u8)
}

fn parse_numbers(issue: &str, text: &str, pool: Pool) -> Result<Vec<u8>, RecordError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != pool.pick_count() {
        return Err(RecordError::InvalidRecordFormat {
            issue: issue.to_string(),
            reason: format!(
                "expected {} {} numbers, found {}",
                pool.pick_count(),
                pool,
                tokens.len()
            ),
        });
    }
    tokens.iter().map(|t| parse_number(issue, t, pool)).collect()
}

fn parse_money(issue: &str, field: &str, text: &str) -> Result<i64, RecordError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse().map_err(|_| RecordError::InvalidRecordFormat {
        issue: issue.to_string(),
        reason: format!("cannot parse {} '{}'", field, text),
    })
}

impl TryFrom<RawRecord> for DrawRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let issue = raw.issue.trim().to_string();
        let front_vec = parse_numbers(&issue, &raw.front_winning_num, Pool::Front)?;
        let back = parse_numbers(&issue, &raw.back_winning_num, Pool::Back)?[0];

        let mut front = [0u8; 6];
        front.copy_from_slice(&front_vec);
        validate_draw(&issue, &front, back)?;

        Ok(DrawRecord {
            sale_money: parse_money(&issue, "saleMoney", &raw.sale_money)?,
            r9_sale_money: parse_money(&issue, "r9SaleMoney", &raw.r9_sale_money)?,
            prize_pool_money: parse_money(&issue, "prizePoolMoney", &raw.prize_pool_money)?,
            issue,
            open_time: raw.open_time,
            week: raw.week,
            front,
            back,
            front_draw_order: raw.seq_front_winning_num,
            back_draw_order: raw.seq_back_winning_num,
            winner_details: raw.winner_details,
        })
    }
}

fn parse_raw_records(text: &str) -> Result<Vec<RawRecord>, RecordError> {
    match serde_json::from_str::<Vec<RawRecord>>(text) {
        Ok(records) => Ok(records),
        Err(whole_err) => {
            // History files are sometimes wrapped in markdown; retry on the outermost array.
            let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
                return Err(RecordError::InvalidRecordFormat {
                    issue: String::new(),
                    reason: format!("no JSON array found ({})", whole_err),
                });
            };
            if end < start {
                return Err(RecordError::InvalidRecordFormat {
                    issue: String::new(),
                    reason: "no JSON array found".to_string(),
                });
            }
            serde_json::from_str(&text[start..=end]).map_err(|e| RecordError::InvalidRecordFormat {
                issue: String::new(),
                reason: format!("invalid JSON array: {}", e),
            })
        }
    }
}

/// Converts every entry on its own so one bad record does not hide the others.
pub fn parse_history_entries(text: &str) -> Result<Vec<Result<DrawRecord, RecordError>>, RecordError> {
    let raw = parse_raw_records(text)?;
    if raw.is_empty() {
        return Err(RecordError::EmptyDataset);
    }
    Ok(raw.into_iter().map(DrawRecord::try_from).collect())
}

/// Parses a history document into records, keeping the file order (newest first).
pub fn parse_history(text: &str) -> Result<Vec<DrawRecord>, RecordError> {
    parse_history_entries(text)?.into_iter().collect()
}

pub fn load_history(path: &Path) -> Result<Vec<DrawRecord>, RecordError> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_history(&text)?;
    info!(path = %path.display(), records = records.len(), "history loaded");
    Ok(records)
}

/// Loads `path`, or falls back to the built-in sample when it cannot be used.
pub fn load_history_or_sample(path: &Path) -> (Vec<DrawRecord>, HistorySource) {
    match load_history(path) {
        Ok(records) => (records, HistorySource::File(path.to_path_buf())),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "history unavailable, using sample data");
            (sample_records(), HistorySource::Sample)
        }
    }
}

fn sample_draw(
    issue: &str,
    open_time: &str,
    week: &str,
    front: [u8; 6],
    back: u8,
    front_draw_order: &str,
    sale_money: i64,
    prize_pool_money: i64,
) -> DrawRecord {
    DrawRecord {
        open_time: open_time.to_string(),
        week: week.to_string(),
        front_draw_order: front_draw_order.to_string(),
        back_draw_order: format!("{:02}", back),
        sale_money,
        prize_pool_money,
        ..DrawRecord::new(issue, front, back)
    }
}

/// Three recent draws, newest first.
pub fn sample_records() -> Vec<DrawRecord> {
    vec![
        sample_draw(
            "2025059", "2025-05-27", "TUE",
            [4, 10, 11, 12, 13, 24], 1,
            "11 24 12 13 10 04", 357_078_086, 2_266_201_070,
        ),
        sample_draw(
            "2025058", "2025-05-25", "SUN",
            [2, 6, 7, 9, 10, 20], 6,
            "07 09 02 06 20 10", 393_500_536, 2_233_844_001,
        ),
        sample_draw(
            "2025057", "2025-05-22", "THU",
            [4, 9, 15, 16, 25, 30], 14,
            "30 25 16 09 15 04", 362_960_216, 2_235_456_730,
        ),
    ]
}

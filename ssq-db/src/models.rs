use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// One published draw. Collections of draws are always newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub issue: String,
    pub open_time: String,
    pub week: String,
    pub front: [u8; 6],
    pub back: u8,
    pub front_draw_order: String,
    pub back_draw_order: String,
    pub sale_money: i64,
    pub r9_sale_money: i64,
    pub prize_pool_money: i64,
    pub winner_details: Vec<WinnerDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WinnerDetail {
    pub award_etc: String,
    pub base_bet_winner: BaseBetWinner,
    pub add_to_bet_winner: String,
    pub add_to_bet_winner2: String,
    pub add_to_bet_winner3: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseBetWinner {
    pub remark: String,
    pub award_num: String,
    pub award_money: String,
    pub total_money: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Front,
    Back,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Front => 33,
            Pool::Back => 16,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Front => 6,
            Pool::Back => 1,
        }
    }

    pub fn contains(&self, number: u8) -> bool {
        number >= 1 && number as usize <= self.size()
    }

    pub fn numbers_from<'a>(&self, draw: &'a DrawRecord) -> &'a [u8] {
        match self {
            Pool::Front => &draw.front,
            Pool::Back => std::slice::from_ref(&draw.back),
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pool::Front => write!(f, "front"),
            Pool::Back => write!(f, "back"),
        }
    }
}

impl DrawRecord {
    /// A record with only the fields the analysis reads; metadata left empty.
    pub fn new(issue: impl Into<String>, front: [u8; 6], back: u8) -> Self {
        Self {
            issue: issue.into(),
            open_time: String::new(),
            week: String::new(),
            front,
            back,
            front_draw_order: String::new(),
            back_draw_order: String::new(),
            sale_money: 0,
            r9_sale_money: 0,
            prize_pool_money: 0,
            winner_details: Vec::new(),
        }
    }

    pub fn sorted_front(&self) -> [u8; 6] {
        let mut front = self.front;
        front.sort_unstable();
        front
    }
}

/// A 4-digit year followed by a digit-only period, e.g. `2025059`.
pub fn validate_issue(issue: &str) -> Result<(), RecordError> {
    let well_formed = issue.len() > 4 && issue.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(RecordError::InvalidRecordFormat {
            issue: issue.to_string(),
            reason: "issue must be a 4-digit year followed by a period number".to_string(),
        });
    }
    Ok(())
}

/// Checks the issue identifier, then the numbers.
pub fn validate_draw(issue: &str, front: &[u8; 6], back: u8) -> Result<(), RecordError> {
    validate_issue(issue)?;
    validate_numbers(issue, front, back)
}

pub fn validate_numbers(issue: &str, front: &[u8; 6], back: u8) -> Result<(), RecordError> {
    for &n in front {
        if !Pool::Front.contains(n) {
            return Err(RecordError::NumberOutOfRange {
                issue: issue.to_string(),
                pool: Pool::Front,
                value: n as i64,
            });
        }
    }
    if !Pool::Back.contains(back) {
        return Err(RecordError::NumberOutOfRange {
            issue: issue.to_string(),
            pool: Pool::Back,
            value: back as i64,
        });
    }
    for i in 0..front.len() {
        for j in (i + 1)..front.len() {
            if front[i] == front[j] {
                return Err(RecordError::InvalidRecordFormat {
                    issue: issue.to_string(),
                    reason: format!("duplicate front number {}", front[i]),
                });
            }
        }
    }
    Ok(())
}

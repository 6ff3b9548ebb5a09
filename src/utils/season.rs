use chrono::{Datelike, NaiveDate};

use crate::types::query::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "Spring"),
            Season::Summer => write!(f, "Summer"),
            Season::Autumn => write!(f, "Autumn"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

impl Season {
    /// 按北半球月份划分
    pub fn from_northern_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// 查询日期对应的季节信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonContext {
    pub season: Season,
    pub year: i32,
    /// 折算到北半球日历后的月份，用于和参考表中的花期比较
    pub northern_month: u32,
    pub southern_hemisphere: bool,
}

impl SeasonContext {
    /// 未提供坐标时按北半球处理
    pub fn derive(date: NaiveDate, coordinates: Option<&Coordinates>) -> Self {
        let southern_hemisphere = coordinates
            .map(Coordinates::is_southern_hemisphere)
            .unwrap_or(false);
        let northern_month = if southern_hemisphere {
            (date.month() + 5) % 12 + 1
        } else {
            date.month()
        };

        Self {
            season: Season::from_northern_month(northern_month),
            year: date.year(),
            northern_month,
            southern_hemisphere,
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.season, self.year)
    }
}

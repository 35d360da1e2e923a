use serde::Serialize;

use crate::error::ConfigError;

/// 得分等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Average,
    Poor,
}

impl ScoreBand {
    /// 索引页中使用的 CSS class
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Good => "good",
            ScoreBand::Average => "average",
            ScoreBand::Poor => "poor",
        }
    }
}

/// 得分等级阈值，边界值归入较高等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBands {
    pub good: u8,
    pub average: u8,
}

impl Default for ScoreBands {
    fn default() -> Self {
        Self {
            good: 90,
            average: 50,
        }
    }
}

impl ScoreBands {
    /// 按阈值划分等级: `>= good` 为 Good，`>= average` 为 Average，其余为 Poor
    pub fn classify(&self, score: u8) -> ScoreBand {
        if score >= self.good {
            ScoreBand::Good
        } else if score >= self.average {
            ScoreBand::Average
        } else {
            ScoreBand::Poor
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average > self.good || self.good > 100 {
            return Err(ConfigError::InvalidValue {
                field: "score_bands".to_string(),
                reason: format!(
                    "需要满足 average <= good <= 100 (当前 average={}, good={})",
                    self.average, self.good
                ),
            });
        }
        Ok(())
    }
}

/// 索引页中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// 详细报告文件名 (html/ 下)
    pub file_name: String,
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub page_size: String,
    pub load_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        let bands = ScoreBands::default();
        assert_eq!(bands.classify(0), ScoreBand::Poor);
        assert_eq!(bands.classify(49), ScoreBand::Poor);
        assert_eq!(bands.classify(50), ScoreBand::Average);
        assert_eq!(bands.classify(89), ScoreBand::Average);
        assert_eq!(bands.classify(90), ScoreBand::Good);
        assert_eq!(bands.classify(100), ScoreBand::Good);
    }

    #[test]
    fn test_custom_thresholds() {
        let bands = ScoreBands {
            good: 80,
            average: 40,
        };
        assert_eq!(bands.classify(80), ScoreBand::Good);
        assert_eq!(bands.classify(40), ScoreBand::Average);
        assert_eq!(bands.classify(39), ScoreBand::Poor);
    }

    #[test]
    fn test_validate() {
        assert!(ScoreBands::default().validate().is_ok());
        assert!(ScoreBands { good: 101, average: 50 }.validate().is_err());
        assert!(ScoreBands { good: 50, average: 50 }.validate().is_ok());
    }
}

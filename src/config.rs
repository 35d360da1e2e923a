use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::ScoreBands;

/// 审计设备类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFactor {
    Desktop,
    Mobile,
}

impl FormFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormFactor::Desktop => "desktop",
            FormFactor::Mobile => "mobile",
        }
    }
}

impl FromStr for FormFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(FormFactor::Desktop),
            "mobile" => Ok(FormFactor::Mobile),
            other => Err(format!("未知设备类型: {}", other)),
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 审计引擎输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("未知输出格式: {}", other)),
        }
    }
}

/// 页面大小 / 加载时间的展示方式，一次运行内只使用一种
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MetricDisplay {
    /// 由原始字节数 / 毫秒数重新计算 (大小保留 3 位小数，时间保留 1 位小数)
    #[default]
    Recomputed,
    /// 直接使用 Lighthouse 的 displayValue，缺失时为 "N/A"
    Engine,
}

impl FromStr for MetricDisplay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recomputed" => Ok(MetricDisplay::Recomputed),
            "engine" => Ok(MetricDisplay::Engine),
            other => Err(format!("未知指标展示方式: {}", other)),
        }
    }
}

/// 单页详细报告渲染器
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RendererKind {
    /// 通过 node 调用 Lighthouse 自带的 ReportGenerator
    #[default]
    Lighthouse,
    /// 内置的简易渲染器
    Builtin,
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lighthouse" => Ok(RendererKind::Lighthouse),
            "builtin" => Ok(RendererKind::Builtin),
            other => Err(format!("未知渲染器: {}", other)),
        }
    }
}

/// 传给审计引擎的固定参数
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditOptions {
    pub form_factor: FormFactor,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub output_format: OutputFormat,
    pub max_wait_for_load_ms: u64,
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 页面列表文件 (.json 或 .toml)
    pub pages_file: String,
    /// 报告根目录
    pub reports_root: String,
    /// lighthouse 可执行文件
    pub lighthouse_bin: String,
    /// node 可执行文件 (Lighthouse 渲染器使用)
    pub node_bin: String,
    /// 浏览器可执行文件，为空时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    // --- 审计参数 ---
    pub form_factor: FormFactor,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub output_format: OutputFormat,
    pub max_wait_for_load_ms: u64,
    // --- 汇总参数 ---
    pub score_bands: ScoreBands,
    pub metric_display: MetricDisplay,
    pub renderer: RendererKind,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_file: "resources/urls.json".to_string(),
            reports_root: "reports".to_string(),
            lighthouse_bin: "lighthouse".to_string(),
            node_bin: "node".to_string(),
            chrome_executable: None,
            form_factor: FormFactor::Desktop,
            viewport_width: 1920,
            viewport_height: 1080,
            output_format: OutputFormat::Json,
            max_wait_for_load_ms: 120_000,
            score_bands: ScoreBands::default(),
            metric_display: MetricDisplay::default(),
            renderer: RendererKind::default(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        let default = Self::default();
        let config = Self {
            pages_file: std::env::var("PAGES_FILE").unwrap_or(default.pages_file),
            reports_root: std::env::var("REPORTS_ROOT").unwrap_or(default.reports_root),
            lighthouse_bin: std::env::var("LIGHTHOUSE_BIN").unwrap_or(default.lighthouse_bin),
            node_bin: std::env::var("NODE_BIN").unwrap_or(default.node_bin),
            chrome_executable: std::env::var("CHROME_EXECUTABLE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or(default.chrome_executable),
            form_factor: env_parse("FORM_FACTOR", default.form_factor, "desktop|mobile")?,
            viewport_width: env_parse("VIEWPORT_WIDTH", default.viewport_width, "u32")?,
            viewport_height: env_parse("VIEWPORT_HEIGHT", default.viewport_height, "u32")?,
            output_format: env_parse("OUTPUT_FORMAT", default.output_format, "json|html")?,
            max_wait_for_load_ms: env_parse(
                "MAX_WAIT_FOR_LOAD_MS",
                default.max_wait_for_load_ms,
                "u64",
            )?,
            score_bands: ScoreBands {
                good: env_parse("SCORE_BAND_GOOD", default.score_bands.good, "u8")?,
                average: env_parse("SCORE_BAND_AVERAGE", default.score_bands.average, "u8")?,
            },
            metric_display: env_parse(
                "METRIC_DISPLAY",
                default.metric_display,
                "recomputed|engine",
            )?,
            renderer: env_parse("REPORT_RENDERER", default.renderer, "lighthouse|builtin")?,
            verbose_logging: env_parse("VERBOSE_LOGGING", default.verbose_logging, "bool")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "viewport".to_string(),
                reason: format!(
                    "视口尺寸必须大于 0 (当前 {}x{})",
                    self.viewport_width, self.viewport_height
                ),
            });
        }
        // 结果需要落盘为 json/<pageName>.json 并在汇总时解析
        if self.output_format != OutputFormat::Json {
            return Err(ConfigError::InvalidValue {
                field: "output_format".to_string(),
                reason: format!("批量审计需要结构化输出 json，当前为 {}", self.output_format.as_str()),
            });
        }
        self.score_bands.validate()
    }

    /// 生成审计引擎参数
    pub fn audit_options(&self) -> AuditOptions {
        AuditOptions {
            form_factor: self.form_factor,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            output_format: self.output_format,
            max_wait_for_load_ms: self.max_wait_for_load_ms,
        }
    }
}

fn env_parse<T: FromStr>(var_name: &str, default: T, expected_type: &str) -> Result<T, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_desktop_audit() {
        let config = Config::default();
        let options = config.audit_options();
        assert_eq!(options.form_factor, FormFactor::Desktop);
        assert_eq!((options.viewport_width, options.viewport_height), (1920, 1080));
        assert_eq!(options.output_format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_html_output() {
        let config = Config {
            output_format: OutputFormat::Html,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "output_format"
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_bands() {
        let config = Config {
            score_bands: ScoreBands { good: 40, average: 60 },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Desktop".parse::<FormFactor>(), Ok(FormFactor::Desktop));
        assert_eq!(" engine ".parse::<MetricDisplay>(), Ok(MetricDisplay::Engine));
        assert_eq!("builtin".parse::<RendererKind>(), Ok(RendererKind::Builtin));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_env_parse_reports_bad_value() {
        std::env::set_var("LHB_TEST_BAD_WIDTH", "wide");
        let err = env_parse::<u32>("LHB_TEST_BAD_WIDTH", 1920, "u32").unwrap_err();
        std::env::remove_var("LHB_TEST_BAD_WIDTH");
        assert!(err.to_string().contains("LHB_TEST_BAD_WIDTH"));
        assert_eq!(env_parse::<u32>("LHB_TEST_UNSET_WIDTH", 1920, "u32").unwrap(), 1920);
    }
}

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{Profile, ProfileArgs};

const AUDIT_TARGET_HEADERS: [&str; 3] = ["标准要求", "当前状态", "备注"];

const KYLIN_HARDENING_STANDARD: &str = "KYJS-KS-Server-6-SHM-V1.0麒麟系统安全加固标准";

const INTERNET_KEYWORDS: [&str; 3] = [
    KYLIN_HARDENING_STANDARD,
    "YD/T 2701-2014 附录A",
    "YD/T 2701-2014 6.2.1账户安全要求",
];

const GOVERNMENT_KEYWORDS: [&str; 4] = [
    KYLIN_HARDENING_STANDARD,
    "GB/T 22239-2019信息安全技术 网络安全等级保护基本要求",
    "JR/T 0068-2020网上银行系统信息安全通用规范",
    "GB/T 35273-2020个人信息安全规范",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    pub target_headers: BTreeSet<String>,
    pub emphasis_keywords: Vec<String>,
}

impl FormatterConfig {
    pub fn for_profile(profile: Profile) -> Self {
        let keywords: &[&str] = match profile {
            Profile::Internet => &INTERNET_KEYWORDS,
            Profile::Government => &GOVERNMENT_KEYWORDS,
        };

        Self {
            target_headers: AUDIT_TARGET_HEADERS
                .iter()
                .map(|header| header.to_string())
                .collect(),
            emphasis_keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid formatter config {}", path.display()))?;
        Ok(config)
    }

    pub fn resolve(args: &ProfileArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::load(path),
            None => Ok(Self::for_profile(args.profile)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_headers.iter().any(|header| header.trim().is_empty()) {
            bail!("target header names must not be empty");
        }
        if self
            .emphasis_keywords
            .iter()
            .any(|keyword| keyword.trim().is_empty())
        {
            bail!("emphasis keywords must not be empty");
        }
        Ok(())
    }

    pub fn is_target_header(&self, name: &str) -> bool {
        self.target_headers.contains(name)
    }
}

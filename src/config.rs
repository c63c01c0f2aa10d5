//! Runtime configuration
//!
//! Values are resolved in order: explicit override (e.g. the one persisted by
//! the login page), build-time environment, built-in default.

use fscape_admin_shared::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_BASE: &str = "https://fscape-api.onrender.com";
pub const DEFAULT_DEMO_EMAIL: &str = "admin@fscape.com";
pub const DEFAULT_DEMO_PASSWORD: &str = "admin123";
pub const DEFAULT_DEMO_NAME: &str = "Admin";
pub const DEFAULT_DEMO_ROLE: &str = "Administrator";
pub const DEFAULT_SUPPORT_EMAIL: &str = "hminh250104@gmail.com";
pub const DEFAULT_SUPPORT_PHONE: &str = "+84 852 325 683";

/// Account accepted by the demo credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: String,
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self {
            email: DEFAULT_DEMO_EMAIL.to_string(),
            password: DEFAULT_DEMO_PASSWORD.to_string(),
            display_name: DEFAULT_DEMO_NAME.to_string(),
            role: DEFAULT_DEMO_ROLE.to_string(),
        }
    }
}

/// Administrator reachable from the login page when signing in fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportContact {
    pub email: String,
    /// Display form; may contain spaces.
    pub phone: String,
}

impl SupportContact {
    pub fn mailto_href(&self) -> String {
        format!("mailto:{}", self.email.trim())
    }

    /// `tel:` link with only the leading `+` and digits kept.
    pub fn tel_href(&self) -> String {
        let dialable: String = self
            .phone
            .trim()
            .chars()
            .enumerate()
            .filter(|(i, c)| c.is_ascii_digit() || (*i == 0 && *c == '+'))
            .map(|(_, c)| c)
            .collect();
        format!("tel:{}", dialable)
    }
}

impl Default for SupportContact {
    fn default() -> Self {
        Self {
            email: DEFAULT_SUPPORT_EMAIL.to_string(),
            phone: DEFAULT_SUPPORT_PHONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub page_size: u32,
    pub demo_account: DemoAccount,
    pub support: SupportContact,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            demo_account: DemoAccount::default(),
            support: SupportContact::default(),
        }
    }
}

impl AppConfig {
    /// Configuration baked in at build time via `FSCAPE_API_BASE` and
    /// `FSCAPE_PAGE_SIZE`.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("FSCAPE_API_BASE"), option_env!("FSCAPE_PAGE_SIZE"))
    }

    /// Builds a config from raw (possibly missing or malformed) values.
    pub fn from_values(api_base: Option<&str>, page_size: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.and_then(normalize_base) {
            config.api_base = base;
        }
        if let Some(size) = page_size
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
        {
            config.page_size = size;
        }
        config
    }

    /// Applies a user-supplied base origin; blank values are ignored.
    pub fn with_api_base_override(mut self, api_base: Option<&str>) -> Self {
        if let Some(base) = api_base.and_then(normalize_base) {
            self.api_base = base;
        }
        self
    }

    pub fn with_demo_account(mut self, account: DemoAccount) -> Self {
        self.demo_account = account;
        self
    }
}

/// Trims whitespace and trailing slashes; `None` for blank input.
pub fn normalize_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let config = AppConfig::from_values(None, Some("zero"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);

        let config = AppConfig::from_values(Some("   "), Some("0"));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn support_links_are_dialable() {
        let support = SupportContact::default();
        assert_eq!(support.mailto_href(), "mailto:hminh250104@gmail.com");
        assert_eq!(support.tel_href(), "tel:+84852325683");

        let local = SupportContact {
            email: " desk@fscape.vn ".into(),
            phone: "(028) 7300-1866".into(),
        };
        assert_eq!(local.mailto_href(), "mailto:desk@fscape.vn");
        assert_eq!(local.tel_href(), "tel:02873001866");
    }

    #[test]
    fn override_wins_and_is_normalised() {
        let config = AppConfig::from_values(Some("http://build.example/"), Some("25"))
            .with_api_base_override(Some(" http://localhost:3000// "));
        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.page_size, 25);
    }
}

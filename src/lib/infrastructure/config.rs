//! Jenkins configuration

use std::{fmt, time::Duration};

use clap::Parser;
use reqwest::Url;

use crate::domain::notifications::SettingsError;

/// Job triggered when `JENKINS_JOB_NAME` is not set
pub const DEFAULT_JOB_NAME: &str = "global-email-sender";

/// Request timeout used when `JENKINS_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw Jenkins configuration, read from the command line or environment
#[derive(Clone, Default, Parser)]
pub struct JenkinsArgs {
    /// The base URL of the Jenkins server
    #[clap(long = "jenkins-url", env = "JENKINS_URL")]
    pub url: Option<String>,

    /// The Jenkins user to authenticate as
    #[clap(long = "jenkins-user", env = "JENKINS_USER")]
    pub user: Option<String>,

    /// The API token of the Jenkins user
    #[clap(long = "jenkins-api-token", env = "JENKINS_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// The job that sends the email
    #[clap(long = "jenkins-job-name", env = "JENKINS_JOB_NAME", default_value = DEFAULT_JOB_NAME)]
    pub job_name: String,

    /// The token that authorises remote builds of the job
    #[clap(long = "jenkins-build-token", env = "JENKINS_BUILD_TOKEN", hide_env_values = true)]
    pub build_token: Option<String>,

    /// Seconds to wait for Jenkins to answer
    #[clap(long = "jenkins-timeout-secs", env = "JENKINS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

impl fmt::Debug for JenkinsArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JenkinsArgs")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("job_name", &self.job_name)
            .field("build_token", &self.build_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl JenkinsArgs {
    /// Reads the configuration from the environment, loading a `.env` file first
    /// if one exists.
    pub fn from_env() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        Self::try_parse_from(["jenkins"]).map_err(|e| SettingsError::InvalidValue(e.to_string()))
    }
}

/// Validated Jenkins configuration
#[derive(Clone, PartialEq, Eq)]
pub struct JenkinsSettings {
    /// The base URL of the Jenkins server, without a trailing slash
    pub url: String,

    /// The Jenkins user to authenticate as
    pub user: String,

    /// The API token of the Jenkins user
    pub api_token: String,

    /// The job that sends the email
    pub job_name: String,

    /// The token that authorises remote builds of the job
    pub build_token: String,

    /// How long to wait for Jenkins to answer
    pub timeout: Duration,
}

impl TryFrom<JenkinsArgs> for JenkinsSettings {
    type Error = SettingsError;

    fn try_from(args: JenkinsArgs) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: Option<String>| {
            value.filter(|v| !v.is_empty()).unwrap_or_else(|| {
                missing.push(name);
                String::new()
            })
        };

        let url = require("JENKINS_URL", args.url);
        let user = require("JENKINS_USER", args.user);
        let api_token = require("JENKINS_API_TOKEN", args.api_token);
        let build_token = require("JENKINS_BUILD_TOKEN", args.build_token);

        if !missing.is_empty() {
            return Err(SettingsError::MissingVariables(missing));
        }

        Url::parse(&url).map_err(|e| SettingsError::InvalidUrl {
            name: "JENKINS_URL",
            reason: e.to_string(),
        })?;

        if args.timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "JENKINS_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let job_name = if args.job_name.is_empty() {
            DEFAULT_JOB_NAME.to_string()
        } else {
            args.job_name
        };

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            user,
            api_token,
            job_name,
            build_token,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

impl fmt::Debug for JenkinsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JenkinsSettings")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("api_token", &"<redacted>")
            .field("job_name", &self.job_name)
            .field("build_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn complete_args() -> JenkinsArgs {
        JenkinsArgs {
            url: Some("https://jenkins.example.com/".to_string()),
            user: Some("robot".to_string()),
            api_token: Some("api-secret".to_string()),
            job_name: DEFAULT_JOB_NAME.to_string(),
            build_token: Some("build-secret".to_string()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_complete_args_are_valid() -> TestResult {
        let settings = JenkinsSettings::try_from(complete_args())?;

        assert_eq!(settings.url, "https://jenkins.example.com");
        assert_eq!(settings.user, "robot");
        assert_eq!(settings.api_token, "api-secret");
        assert_eq!(settings.build_token, "build-secret");
        assert_eq!(settings.job_name, "global-email-sender");
        assert_eq!(settings.timeout, Duration::from_secs(30));

        Ok(())
    }

    #[test]
    fn test_all_missing_variables_are_listed() {
        let args = JenkinsArgs {
            user: Some("robot".to_string()),
            api_token: Some(String::new()),
            ..Default::default()
        };

        let err = JenkinsSettings::try_from(args).unwrap_err();

        assert_eq!(
            err,
            SettingsError::MissingVariables(vec![
                "JENKINS_URL",
                "JENKINS_API_TOKEN",
                "JENKINS_BUILD_TOKEN"
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: JENKINS_URL, JENKINS_API_TOKEN, JENKINS_BUILD_TOKEN"
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let args = JenkinsArgs {
            url: Some("not a url".to_string()),
            ..complete_args()
        };

        let err = JenkinsSettings::try_from(args).unwrap_err();

        assert!(matches!(
            err,
            SettingsError::InvalidUrl {
                name: "JENKINS_URL",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let args = JenkinsArgs {
            timeout_secs: 0,
            ..complete_args()
        };

        let err = JenkinsSettings::try_from(args).unwrap_err();

        assert_eq!(
            err,
            SettingsError::InvalidValue(
                "JENKINS_TIMEOUT_SECS must be greater than zero".to_string()
            )
        );
    }

    #[test]
    fn test_args_debug_redacts_tokens() {
        let debug = format!("{:?}", complete_args());

        assert!(debug.contains("robot"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("api-secret"));
        assert!(!debug.contains("build-secret"));
    }

    #[test]
    fn test_empty_job_name_falls_back_to_default() -> TestResult {
        let args = JenkinsArgs {
            job_name: String::new(),
            ..complete_args()
        };

        let settings = JenkinsSettings::try_from(args)?;

        assert_eq!(settings.job_name, DEFAULT_JOB_NAME);

        Ok(())
    }

    #[test]
    fn test_args_parse_from_flags() -> TestResult {
        let args = JenkinsArgs::try_parse_from([
            "jenkins",
            "--jenkins-url",
            "http://localhost:8080",
            "--jenkins-user",
            "robot",
            "--jenkins-api-token",
            "api-secret",
            "--jenkins-build-token",
            "build-secret",
            "--jenkins-job-name",
            "mailer",
            "--jenkins-timeout-secs",
            "5",
        ])?;

        let settings = JenkinsSettings::try_from(args)?;

        assert_eq!(settings.url, "http://localhost:8080");
        assert_eq!(settings.job_name, "mailer");
        assert_eq!(settings.timeout, Duration::from_secs(5));

        Ok(())
    }

    #[test]
    fn test_debug_redacts_tokens() -> TestResult {
        let settings = JenkinsSettings::try_from(complete_args())?;

        let debug = format!("{:?}", settings);

        assert!(debug.contains("robot"));
        assert!(!debug.contains("api-secret"));
        assert!(!debug.contains("build-secret"));

        Ok(())
    }
}

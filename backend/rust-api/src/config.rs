use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub student_email: String,
    pub student_password: String,
    pub default_test_duration_seconds: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let jwt_secret = settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: JWT_SECRET must be set in production!");
                }
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            });

        let admin_email = settings
            .get_string("seed.admin_email")
            .or_else(|_| env::var("SEED_ADMIN_EMAIL"))
            .unwrap_or_else(|_| "admin@jee.com".to_string());

        let admin_password = settings
            .get_string("seed.admin_password")
            .or_else(|_| env::var("SEED_ADMIN_PASSWORD"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: SEED_ADMIN_PASSWORD must be set in production!");
                }
                "admin123".to_string()
            });

        let student_email = settings
            .get_string("seed.student_email")
            .or_else(|_| env::var("SEED_STUDENT_EMAIL"))
            .unwrap_or_else(|_| "test@gmail.com".to_string());

        let student_password = settings
            .get_string("seed.student_password")
            .or_else(|_| env::var("SEED_STUDENT_PASSWORD"))
            .unwrap_or_else(|_| "test123".to_string());

        let default_test_duration_seconds = settings
            .get_string("exam.default_test_duration_seconds")
            .ok()
            .or_else(|| env::var("DEFAULT_TEST_DURATION_SECONDS").ok())
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(3600);

        Ok(Config {
            bind_addr,
            jwt_secret,
            admin_email,
            admin_password,
            student_email,
            student_password,
            default_test_duration_seconds,
        })
    }
}

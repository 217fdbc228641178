use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub session_sweep_secs: u64,
    pub payment_sweep_secs: u64,
    pub notify_webhook_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            session_sweep_secs: env::var("SESSION_SWEEP_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .expect("SESSION_SWEEP_SECS must be a number"),
            payment_sweep_secs: env::var("PAYMENT_SWEEP_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .expect("PAYMENT_SWEEP_SECS must be a number"),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok(),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

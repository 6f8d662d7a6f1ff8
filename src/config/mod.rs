//! 配置管理
//!
//! 加载顺序：内置默认值 → `config.toml` → `config.{APP_ENV}.toml` → `KHBO_*` 环境变量
//! → 常用环境变量（`DATABASE_URL`、`JWT_SECRET`、`RUST_LOG` 等）。

mod r#impl;
mod structs;

pub use structs::*;

/// 内置默认配置
pub(crate) const DEFAULT_CONFIG: &str = r#"
[app]
system_name = "KH Back-office"
environment = "development"
log_level = "info"

[server]
host = "127.0.0.1"
port = 8080
unix_socket_path = ""
workers = 0
max_workers = 8

[server.timeouts]
client_request = 5000
client_disconnect = 1000
keep_alive = 75

[server.limits]
max_payload_size = 1048576

[jwt]
secret = "change-me-in-production"
access_token_expiry = 15
refresh_token_expiry = 7
refresh_token_remember_me_expiry = 30

[argon2]
memory_cost = 19456
time_cost = 2
parallelism = 1

[database]
url = "khbo.db"
pool_size = 10
timeout = 30

[cache]
type = "moka"
default_ttl = 60

[cache.redis]
url = "redis://127.0.0.1:6379"
key_prefix = "khbo:"
pool_size = 10

[cache.memory]
max_capacity = 10000

[cors]
allowed_origins = ["*"]
allowed_methods = ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"]
allowed_headers = ["Authorization", "Content-Type"]
max_age = 3600

[evaluation]
hr_template_evaluee_role_id = 2
"#;

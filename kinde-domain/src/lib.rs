/*!
# Kinde Domain

Typed client layer for the Kinde management API, organized along hexagonal
architecture lines.

This crate provides:
- Domain models for Kinde resources (User, Organization, Role, Identity, etc.)
- Port definitions for the token source and the management API
- Application services implementing the admin use cases
- Infrastructure adapters for the REST API, tokens, configuration and logging

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • UserManagementService    • OrganizationManagementService │
│  • RoleManagementService                                    │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • KindeRepository          • TokenManager                  │
│  • ConfigurationPort                                        │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • KindeRestAdapter         • KindeTokenManager             │
│  • KindeHttpClient          • EnvConfigurationAdapter       │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,no_run
use kinde_domain::{AppConfig, KindeService, User};

# async fn run() -> kinde_domain::DomainResult<()> {
let config = AppConfig::from_env()?;
kinde_domain::infrastructure::adapters::init_tracing(&config.logging)?;

let kinde = KindeService::from_config(&config)?;
let users = kinde.users.list_users(true).await?;
tracing::info!(count = users.len(), "Listed users");

let mut user: User = kinde.users.get_user("kp_123").await?;
user.email = Some("new@example.com".to_string());
let outcome = kinde.users.update_user(&user).await?;
assert!(outcome.is_complete());
# Ok(())
# }
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod service;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use service::KindeService;

//! Administrator authentication: JWT issue/verify, bcrypt hashing and the
//! bearer-token middleware guarding `/api/admin/*`.

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod seed;

pub use jwt::{Claims, JwtService};
pub use middleware::{auth_middleware, AuthState, AuthUser};

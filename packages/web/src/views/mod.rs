mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod shell;
pub use shell::{AdminArea, AgentArea, Dashboard, NotFound, RoleGate, Shell, Site};

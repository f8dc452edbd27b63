pub mod academic;

pub mod assignments;

pub mod attendance;

pub mod auth;

pub mod behavior;

pub mod fees;

pub mod files;

pub mod messages;

pub mod notices;

pub mod org;

pub mod system;

pub mod users;

pub use academic::configure_academic_routes;
pub use assignments::configure_assignments_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use behavior::configure_behavior_routes;
pub use fees::configure_fees_routes;
pub use files::configure_file_routes;
pub use messages::configure_messages_routes;
pub use notices::configure_notices_routes;
pub use org::configure_org_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

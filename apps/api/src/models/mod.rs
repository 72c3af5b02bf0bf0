pub mod access;
pub mod attendance;
pub mod ess;
pub mod policy;
pub mod recruitment;
pub mod template;

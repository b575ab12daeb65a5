pub const SERVICE: &str = "assign-console";
pub const ENV: &str = "ENV";

pub const LOCAL_ENV: &str = "local";

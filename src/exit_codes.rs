//! Process exit codes.

pub const SUCCESS: i32 = 0;
/// Bad arguments or answers.
pub const USER_ERROR: i32 = 1;
/// The subnet plan could not be computed.
pub const PLAN_FAILURE: i32 = 2;
/// Templates or output directory could not be written.
pub const OUTPUT_FAILURE: i32 = 3;

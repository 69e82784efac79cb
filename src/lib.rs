mod cli;
pub mod commands;

use course_sequence::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

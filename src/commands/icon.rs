//! `icon` — multi-resolution clock icon generator

use log::info;
use std::path::Path;

use crate::error::{Result, TableroError};
use crate::icon;

pub fn run(out: &Path) -> Result<()> {
    icon::write_clock_icon(out)?;
    info!("icon saved to: {}", out.display());
    Ok(())
}

/// Exit codes: 0 clean, 2 any rasterization or write failure
#[must_use]
pub fn exit_code(_err: &TableroError) -> i32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&TableroError::Icon("encode".into())), 2);
    }
}

use std::fmt::{self, Write};

use super::domain::ProfitProjection;
use super::profit::MONTHLY_BILLS;

/// WhatsApp-ready summary of a deal. Downstream messaging templates depend on
/// the line order and the `@ 50%` / `@ 70%` / `@ 100%` labels.
pub fn render_message(
    address: &str,
    bedrooms: i64,
    rent: f64,
    profits: &ProfitProjection,
) -> String {
    let mut message = String::new();
    // Writing into a String never fails.
    let _ = write_message(&mut message, address, bedrooms, rent, profits);
    message
}

fn write_message(
    out: &mut impl Write,
    address: &str,
    bedrooms: i64,
    rent: f64,
    profits: &ProfitProjection,
) -> fmt::Result {
    writeln!(out, "{address}, {bedrooms} Bed")?;
    writeln!(out)?;
    writeln!(out, "Rent + Bills = £{:.2}", rent + MONTHLY_BILLS)?;
    writeln!(out)?;
    write!(out, "| Conservative Figures |")?;
    for (occupancy, profit) in profits.iter() {
        write!(
            out,
            "\n£{profit:.2} PPM @ {percent}%",
            percent = occupancy.percent()
        )?;
    }
    Ok(())
}

//! `griddle hours` command

use anyhow::Result;
use chrono::Local;

use crate::cli::HoursArgs;
use crate::GlobalOptions;
use griddle::ops::pickup::BusinessHours;
use griddle::util::Status;
use griddle::OrderBackend;

pub fn execute(args: HoursArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let backend = global_opts.backend()?;

    let closed = shell.spin(Status::Fetching, "closures", || backend.closed_dates())?;
    let hours = global_opts.config.business_hours()?.with_closed_dates(closed);

    print!("{}", render(&hours, Local::now().date_naive(), args.days));
    Ok(())
}

fn render(hours: &BusinessHours, today: chrono::NaiveDate, days: usize) -> String {
    let mut out = format!(
        "open {} - {}, closed {}s\n",
        hours.open.format("%-I:%M %p"),
        hours.close.format("%-I:%M %p"),
        hours.closed_day
    );
    for date in hours.available_dates(today, days) {
        out.push_str(&format!("  {}\n", date.format("%a %Y-%m-%d")));
    }
    out
}

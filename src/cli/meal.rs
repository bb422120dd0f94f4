use mealcal_shared::MonthKey;

use super::Session;

pub fn assign(session: &mut Session, month: MonthKey, day: u8, dish: &str) -> anyhow::Result<()> {
    session.planner.assign(month, day, dish)?;
    println!("{dish} planned on {month}-{day:02}");

    Ok(())
}

pub fn unassign(
    session: &mut Session,
    month: MonthKey,
    day: u8,
    dish: &str,
) -> anyhow::Result<()> {
    if session.planner.unassign(month, day, dish) {
        println!("{dish} removed from {month}-{day:02}");
    } else {
        println!("{dish} is not planned on {month}-{day:02}");
    }

    Ok(())
}

pub fn show(session: &Session, month: MonthKey) -> anyhow::Result<()> {
    let days = session.planner.query(month);

    println!("{month}");
    if days.is_empty() {
        println!("No meals planned");
        return Ok(());
    }

    let mut week = None;
    for (day, dishes) in days {
        let day_week = month.week_of(*day);
        if week != Some(day_week) {
            println!("Week {}", day_week + 1);
            week = Some(day_week);
        }

        println!("{day:>4}  {}", dishes.join(", "));
    }

    Ok(())
}

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title of the Wikipedia day page, e.g. `7 января`.
pub fn article_title(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS_GENITIVE[date.month0() as usize])
}

/// Bold heading line, e.g. `*Среда, 7 января 2026 года*`.
pub fn full_date(date: NaiveDate) -> String {
    format!(
        "*{}, {} {} года*",
        capitalize(weekday_name(date.weekday())),
        article_title(date),
        date.year()
    )
}

/// Russian plural form of "день" for `count`.
pub fn day_noun(count: u32) -> &'static str {
    let rest = count % 10;
    if (11..20).contains(&(count % 100)) {
        "дней"
    } else if rest == 1 {
        "день"
    } else if (2..5).contains(&rest) {
        "дня"
    } else {
        "дней"
    }
}

fn days_in_year(year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365)
}

/// Report stats: the date heading plus how far into the year it is.
pub fn stats(date: NaiveDate) -> String {
    let ordinal = date.ordinal();
    let rest = days_in_year(date.year()) - ordinal;
    let progress = if rest > 0 {
        format!(
            "{}-й день года. До конца года {} {}",
            ordinal,
            rest,
            day_noun(rest)
        )
    } else {
        "Завтра уже Новый Год!".to_string()
    };
    format!("{}\n{}\n", full_date(date), progress)
}

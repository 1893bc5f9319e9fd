//! The fixed set of personas that get avatars
//!
//! Each entry pairs the display name used for files and records with the
//! Wikipedia article title the portrait is taken from.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RosterEntry {
    /// Name shown in the app; source of the file token
    pub(crate) name: &'static str,
    /// Wikipedia article title
    pub(crate) title: &'static str,
}

const fn entry(name: &'static str, title: &'static str) -> RosterEntry {
    RosterEntry { name, title }
}

pub(crate) static ROSTER: &[RosterEntry] = &[
    entry("Barack Obama", "Barack Obama"),
    entry("Donald Trump", "Donald Trump"),
    entry("Angela Merkel", "Angela Merkel"),
    entry("Emmanuel Macron", "Emmanuel Macron"),
    entry("Narendra Modi", "Narendra Modi"),
    entry("Xi Jinping", "Xi Jinping"),
    entry("Vladimir Putin", "Vladimir Putin"),
    entry("Volodymyr Zelenskyy", "Volodymyr Zelenskyy"),
    entry("Winston Churchill", "Winston Churchill"),
    entry("Margaret Thatcher", "Margaret Thatcher"),
    entry("Nelson Mandela", "Nelson Mandela"),
    entry("Jacinda Ardern", "Jacinda Ardern"),
    entry("Abraham Lincoln", "Abraham Lincoln"),
    entry("John F. Kennedy", "John F. Kennedy"),
    entry("Benjamin Netanyahu", "Benjamin Netanyahu"),
    entry("Mahatma Gandhi", "Mahatma Gandhi"),
    entry("Martin Luther King Jr.", "Martin Luther King Jr."),
    entry("Alexandria Ocasio-Cortez", "Alexandria Ocasio-Cortez"),
    entry("Elon Musk", "Elon Musk"),
    entry("Sam Altman", "Sam Altman"),
    entry("Satya Nadella", "Satya Nadella"),
    entry("Tim Cook", "Tim Cook"),
    entry("Sundar Pichai", "Sundar Pichai"),
    entry("Mark Zuckerberg", "Mark Zuckerberg"),
    entry("Jeff Bezos", "Jeff Bezos"),
    entry("Jensen Huang", "Jensen Huang"),
    entry("Dario Amodei", "Dario Amodei"),
    entry("Demis Hassabis", "Demis Hassabis"),
    entry("Andrej Karpathy", "Andrej Karpathy"),
    entry("Yann LeCun", "Yann LeCun"),
    entry("Geoffrey Hinton", "Geoffrey Hinton"),
    entry("Ilya Sutskever", "Ilya Sutskever"),
    entry("Linus Torvalds", "Linus Torvalds"),
    entry("Bill Gates", "Bill Gates"),
    entry("Steve Jobs", "Steve Jobs"),
    entry("Larry Page", "Larry Page"),
    entry("Marc Andreessen", "Marc Andreessen"),
    entry("Peter Thiel", "Peter Thiel"),
    entry("Lisa Su", "Lisa Su"),
    entry("Sheryl Sandberg", "Sheryl Sandberg"),
    entry("Warren Buffett", "Warren Buffett"),
    entry("Scott Galloway", "Scott Galloway (professor)"),
    // Also a moderator; listed once
    entry("Oprah Winfrey", "Oprah Winfrey"),
    entry("Michelle Obama", "Michelle Obama"),
    entry("Ruth Bader Ginsburg", "Ruth Bader Ginsburg"),
    entry("Pope Francis", "Pope Francis"),
    entry("Richard Branson", "Richard Branson"),
    entry("Ray Dalio", "Ray Dalio"),
    entry("Jack Ma", "Jack Ma"),
    entry("Neil deGrasse Tyson", "Neil deGrasse Tyson"),
    // Moderators
    entry("Tim Russert", "Tim Russert"),
    entry("Jeremy Paxman", "Jeremy Paxman"),
    entry("Christiane Amanpour", "Christiane Amanpour"),
    entry("Oriana Fallaci", "Oriana Fallaci"),
    entry("Charlie Rose", "Charlie Rose"),
    entry("Lex Fridman", "Lex Fridman"),
    entry("Terry Gross", "Terry Gross"),
    entry("Larry King", "Larry King"),
    entry("Dick Cavett", "Dick Cavett"),
    entry("Anderson Cooper", "Anderson Cooper"),
    entry("Jim Lehrer", "Jim Lehrer"),
    entry("Candy Crowley", "Candy Crowley"),
    entry("Howard Stern", "Howard Stern"),
    entry("Bill Maher", "Bill Maher"),
    entry("Piers Morgan", "Piers Morgan"),
    entry("David Frost", "David Frost"),
    entry("Faisal Al Kasim", "Faisal al-Qassem"),
    entry("Dwarkesh Patel", "Dwarkesh Patel"),
    entry("Kara Swisher", "Kara Swisher"),
];

/// Derive the filesystem key for a display name.
///
/// Lowercases, then collapses every run of characters outside `[a-z0-9]`
/// into a single hyphen and trims hyphens from both ends.
pub(crate) fn to_token(name: &str) -> String {
    let mut token = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !token.is_empty() {
                token.push('-');
            }
            pending_hyphen = false;
            token.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    token
}

impl RosterEntry {
    pub(crate) fn token(&self) -> String {
        to_token(self.name)
    }

    /// Match by display name or token, ignoring case
    fn matches(&self, query: &str) -> bool {
        self.name.eq_ignore_ascii_case(query.trim()) || self.token() == to_token(query)
    }
}

/// Restrict the roster to the requested names, keeping roster order.
///
/// An empty filter selects everything; a name that matches nothing is an error.
pub(crate) fn select(
    roster: &'static [RosterEntry],
    only: &[String],
) -> Result<Vec<RosterEntry>, AppError> {
    if only.is_empty() {
        return Ok(roster.to_vec());
    }

    for query in only {
        if !roster.iter().any(|e| e.matches(query)) {
            return Err(AppError::UnknownName {
                input: query.clone(),
            });
        }
    }

    Ok(roster
        .iter()
        .filter(|e| only.iter().any(|q| e.matches(q)))
        .copied()
        .collect())
}

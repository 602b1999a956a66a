//! Heuristic password strength scoring.
//!
//! Counts character classes and length. It says nothing about entropy or
//! resistance to guessing.

use serde::Serialize;
use std::fmt;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthReport {
    pub score: u8,
    pub strength: Strength,
    pub feedback: Vec<String>,
}

pub fn assess_strength(password: &str) -> anyhow::Result<StrengthReport> {
    if password.is_empty() {
        anyhow::bail!("Please enter a password");
    }

    let mut score = 0;
    let mut feedback = Vec::new();

    let length = password.chars().count();
    if length >= 12 {
        score += 2;
    } else if length >= 8 {
        score += 1;
    } else {
        feedback.push("Password should be at least 8 characters long".to_string());
    }

    let checks: [(fn(char) -> bool, &str); 4] = [
        (|c: char| c.is_ascii_uppercase(), "Add uppercase letters"),
        (|c: char| c.is_ascii_lowercase(), "Add lowercase letters"),
        (|c: char| c.is_ascii_digit(), "Add numbers"),
        (|c: char| SPECIAL_CHARS.contains(c), "Add special characters"),
    ];
    for (present, advice) in checks {
        if password.chars().any(present) {
            score += 1;
        } else {
            feedback.push(advice.to_string());
        }
    }

    let strength = match score {
        5.. => Strength::Strong,
        3..=4 => Strength::Moderate,
        _ => Strength::Weak,
    };

    Ok(StrengthReport {
        score,
        strength,
        feedback,
    })
}

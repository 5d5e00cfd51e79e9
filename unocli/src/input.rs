//! Blocking console prompts. Everything re-prompts on bad input; the only
//! error out of here is a closed input stream.

use std::io::{self, Write};

use color_eyre::{eyre::eyre, Result};

use tuno::card::CardColor;

pub fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Err(eyre!("input stream closed"));
    }
    Ok(line.trim().to_string())
}

pub fn read_number(prompt: &str) -> Result<i32> {
    loop {
        match read_line(prompt)?.parse() {
            Ok(number) => return Ok(number),
            Err(_) => println!("Invalid number. Try again."),
        }
    }
}

pub fn read_player_count() -> Result<usize> {
    loop {
        let count = read_number("Enter number of players (2-4): ")?;
        if (2..=4).contains(&count) {
            return Ok(count as usize);
        }
        println!("Invalid number of players.");
    }
}

pub fn read_color() -> Result<CardColor> {
    loop {
        let answer = read_line("Choose color (R/G/B/Y): ")?;
        if let Some(color) = answer.chars().next().and_then(CardColor::from_letter) {
            if answer.len() == 1 {
                return Ok(color);
            }
        }
        println!("Invalid color. Try again.");
    }
}

pub fn read_yes_no(prompt: &str) -> Result<bool> {
    loop {
        let answer = read_line(prompt)?;
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
        println!("Please answer y or n.");
    }
}

use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colour names as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub border_color: String,
    pub snake_color: String,
    pub food_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_color: "white".to_string(),
            snake_color: "green".to_string(),
            food_color: "red".to_string(),
        }
    }
}

/// Parsed theme, ready for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub border: Color,
    pub snake: Color,
    pub food: Color,
}

impl Theme {
    pub fn palette(&self) -> Result<Palette, String> {
        Ok(Palette {
            border: parse_color("border_color", &self.border_color)?,
            snake: parse_color("snake_color", &self.snake_color)?,
            food: parse_color("food_color", &self.food_color)?,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        self.palette().map(|_| ())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Color::White,
            snake: Color::Green,
            food: Color::Red,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::from_str(value).map_err(|_| format!("{field}: unknown colour {value:?}"))
}

//! Scenario scripts
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! click status              # hit the surface
//! click artwork item 3
//! click artwork back
//! back                      # same as `click artwork back`
//! type pin 0 5
//! key pin 1 backspace
//! focus pin 2
//! scroll 120                # artwork grid
//! advance 2000
//! ```

use std::time::Duration;

use anyhow::{bail, Context, Result};
use neat_core::{HitTarget, InputEvent, Key};
use neat_widgets::WidgetKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Input { widget: WidgetKind, event: InputEvent },
    Advance(Duration),
}

/// A parsed script line
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// 1-based line number
    pub line: usize,
    pub source: String,
    pub action: Action,
}

pub fn parse(src: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, raw) in src.lines().enumerate() {
        let source = raw.split('#').next().unwrap_or_default().trim();
        if source.is_empty() {
            continue;
        }
        let action = parse_line(source).with_context(|| format!("line {}: `{}`", index + 1, source))?;
        steps.push(Step {
            line: index + 1,
            source: source.to_string(),
            action,
        });
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Action> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let action = match words.as_slice() {
        ["click", widget, rest @ ..] => Action::Input {
            widget: widget_kind(widget)?,
            event: InputEvent::click_on(hit_target(rest)?),
        },
        ["back"] => Action::Input {
            widget: WidgetKind::Artwork,
            event: InputEvent::click_on(HitTarget::Back),
        },
        ["type", widget, slot, text @ ..] => {
            pin_only(widget)?;
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::TextInput {
                    slot: number(slot, "slot")?,
                    text: text.join(" "),
                },
            }
        }
        ["key", widget, slot, key] => {
            pin_only(widget)?;
            let key = match *key {
                "backspace" => Key::Backspace,
                other => bail!("unknown key '{other}'"),
            };
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::KeyDown {
                    slot: number(slot, "slot")?,
                    key,
                },
            }
        }
        ["focus", widget, slot] => {
            pin_only(widget)?;
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::Focus {
                    slot: number(slot, "slot")?,
                },
            }
        }
        ["scroll", offset] | ["scroll", "artwork", offset] => Action::Input {
            widget: WidgetKind::Artwork,
            event: InputEvent::Scroll {
                offset: offset
                    .parse()
                    .with_context(|| format!("invalid scroll offset '{offset}'"))?,
            },
        },
        ["advance", millis] => Action::Advance(Duration::from_millis(number(millis, "duration")?)),
        [command, ..] => bail!("unknown command '{command}'"),
        [] => bail!("empty command"),
    };
    Ok(action)
}

fn widget_kind(word: &str) -> Result<WidgetKind> {
    word.parse().map_err(anyhow::Error::msg)
}

fn pin_only(word: &str) -> Result<()> {
    match widget_kind(word)? {
        WidgetKind::Pin => Ok(()),
        other => bail!("'{other}' has no input slots"),
    }
}

fn hit_target(words: &[&str]) -> Result<HitTarget> {
    let target = match words {
        [] | ["surface"] => HitTarget::Surface,
        ["back"] => HitTarget::Back,
        ["inert"] => HitTarget::Inert,
        ["item", index] => HitTarget::Item(number(index, "item index")?),
        other => bail!("unknown click target '{}'", other.join(" ")),
    };
    Ok(target)
}

fn number<T: std::str::FromStr>(word: &str, what: &str) -> Result<T> {
    word.parse()
        .map_err(|_| anyhow::anyhow!("invalid {what} '{word}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> Action {
        parse_line(line).unwrap()
    }

    #[test]
    fn test_clicks() {
        assert_eq!(
            action("click status"),
            Action::Input {
                widget: WidgetKind::Status,
                event: InputEvent::click_on(HitTarget::Surface),
            }
        );
        assert_eq!(
            action("click artwork item 3"),
            Action::Input {
                widget: WidgetKind::Artwork,
                event: InputEvent::click_on(HitTarget::Item(3)),
            }
        );
        assert_eq!(action("back"), action("click artwork back"));
    }

    #[test]
    fn test_pin_inputs() {
        assert_eq!(
            action("type pin 0 5"),
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::TextInput {
                    slot: 0,
                    text: "5".to_string(),
                },
            }
        );
        assert_eq!(
            action("type pin 2"),
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::TextInput {
                    slot: 2,
                    text: String::new(),
                },
            }
        );
        assert_eq!(
            action("key pin 1 backspace"),
            Action::Input {
                widget: WidgetKind::Pin,
                event: InputEvent::KeyDown {
                    slot: 1,
                    key: Key::Backspace,
                },
            }
        );
    }

    #[test]
    fn test_scroll_and_advance() {
        assert_eq!(action("scroll 120"), action("scroll artwork 120"));
        assert_eq!(action("advance 2000"), Action::Advance(Duration::from_millis(2000)));
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let steps = parse("# warm up\n\nclick status  # go\nadvance 10\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].line, 3);
        assert_eq!(steps[0].source, "click status");
        assert_eq!(steps[1].line, 4);
    }

    #[test]
    fn test_errors_name_the_line() {
        let err = parse("click status\nclick toaster\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        assert!(parse_line("type status 0 5").is_err());
        assert!(parse_line("advance soon").is_err());
        assert!(parse_line("click artwork item x").is_err());
        assert!(parse_line("jump").is_err());
        assert!(parse_line("key pin 0 enter").is_err());
    }
}

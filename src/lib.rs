//! Gozcu library exports for testing

use clap::ValueEnum;

pub mod api;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// The four panels of the console. Tab cycles through them in this order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    #[default]
    Live,
    Dashboard,
    Training,
    Chat,
}

impl Panel {
    pub fn next(self) -> Panel {
        match self {
            Panel::Live => Panel::Dashboard,
            Panel::Dashboard => Panel::Training,
            Panel::Training => Panel::Chat,
            Panel::Chat => Panel::Live,
        }
    }

    /// Turkish tab label, as on the original admin pages.
    pub fn label(self) -> &'static str {
        match self {
            Panel::Live => "Canlı Sohbetler",
            Panel::Dashboard => "İstatistikler",
            Panel::Training => "Eğitim Verileri",
            Panel::Chat => "Sohbet",
        }
    }
}

// clap needs Display for `default_value_t`; the output must round-trip
// through ValueEnum parsing, so these are the kebab-case value names.
impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Panel::Live => "live",
            Panel::Dashboard => "dashboard",
            Panel::Training => "training",
            Panel::Chat => "chat",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_cycle_wraps() {
        assert_eq!(Panel::Live.next(), Panel::Dashboard);
        assert_eq!(Panel::Chat.next(), Panel::Live);
        assert_eq!(
            Panel::Live.next().next().next().next(),
            Panel::Live
        );
    }
}

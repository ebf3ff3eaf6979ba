//! Wear conditions and StatTrak selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cosmetic wear tier, appended to a market name as `(Field-Tested)` etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Wear {
    #[serde(rename = "Factory New")]
    FactoryNew,
    #[serde(rename = "Minimal Wear")]
    MinimalWear,
    #[default]
    #[serde(rename = "Field-Tested")]
    FieldTested,
    #[serde(rename = "Well-Worn")]
    WellWorn,
    #[serde(rename = "Battle-Scarred")]
    BattleScarred,
}

impl Wear {
    /// Returns the label used inside market names.
    pub fn label(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "Factory New",
            Wear::MinimalWear => "Minimal Wear",
            Wear::FieldTested => "Field-Tested",
            Wear::WellWorn => "Well-Worn",
            Wear::BattleScarred => "Battle-Scarred",
        }
    }

    /// Returns the common two-letter abbreviation.
    pub fn short(&self) -> &'static str {
        match self {
            Wear::FactoryNew => "FN",
            Wear::MinimalWear => "MW",
            Wear::FieldTested => "FT",
            Wear::WellWorn => "WW",
            Wear::BattleScarred => "BS",
        }
    }

    /// Returns the parenthesized suffix, e.g. `(Field-Tested)`.
    pub fn suffix(&self) -> String {
        format!("({})", self.label())
    }

    /// Returns the 1-based position in the interactive menu.
    pub fn menu_number(&self) -> u8 {
        match self {
            Wear::FactoryNew => 1,
            Wear::MinimalWear => 2,
            Wear::FieldTested => 3,
            Wear::WellWorn => 4,
            Wear::BattleScarred => 5,
        }
    }

    /// Finds the wear whose suffix appears in a full market name.
    pub fn from_market_name(name: &str) -> Option<Wear> {
        Wear::all().iter().copied().find(|w| name.contains(&w.suffix()))
    }

    /// Returns all wear tiers from best to worst.
    pub fn all() -> &'static [Wear] {
        &[Wear::FactoryNew, Wear::MinimalWear, Wear::FieldTested, Wear::WellWorn, Wear::BattleScarred]
    }
}

impl fmt::Display for Wear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Wear {
    type Err = WearParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");

        Wear::all()
            .iter()
            .copied()
            .find(|w| {
                key == w.menu_number().to_string()
                    || key == w.short().to_lowercase()
                    || key == w.label().to_lowercase().replace(' ', "-")
            })
            .ok_or_else(|| WearParseError(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct WearParseError(String);

impl fmt::Display for WearParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown wear '{}'. Valid wears: 1-5, fn, mw, ft, ww, bs, all", self.0)
    }
}

impl std::error::Error for WearParseError {}

/// Which wear tiers a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WearSelection {
    One(Wear),
    All,
}

impl WearSelection {
    /// Returns the wear tiers covered by this selection.
    pub fn wears(&self) -> Vec<Wear> {
        match self {
            WearSelection::One(wear) => vec![*wear],
            WearSelection::All => Wear::all().to_vec(),
        }
    }

    /// Returns true if `wear` is part of the selection.
    pub fn includes(&self, wear: Wear) -> bool {
        match self {
            WearSelection::One(selected) => *selected == wear,
            WearSelection::All => true,
        }
    }
}

impl Default for WearSelection {
    fn default() -> Self {
        WearSelection::One(Wear::default())
    }
}

impl fmt::Display for WearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WearSelection::One(wear) => write!(f, "{}", wear),
            WearSelection::All => write!(f, "all"),
        }
    }
}

impl FromStr for WearSelection {
    type Err = WearParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(WearSelection::All);
        }
        s.parse().map(WearSelection::One)
    }
}

/// How StatTrak variants are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatTrakMode {
    /// Regular items only.
    #[default]
    No,
    /// StatTrak items only.
    Only,
    /// Both regular and StatTrak items.
    Both,
}

impl StatTrakMode {
    /// Returns the StatTrak flags covered, regular first.
    pub fn variants(&self) -> &'static [bool] {
        match self {
            StatTrakMode::No => &[false],
            StatTrakMode::Only => &[true],
            StatTrakMode::Both => &[false, true],
        }
    }

    /// Returns true if an item with the given StatTrak flag is included.
    pub fn includes(&self, stattrak: bool) -> bool {
        match self {
            StatTrakMode::No => !stattrak,
            StatTrakMode::Only => stattrak,
            StatTrakMode::Both => true,
        }
    }
}

impl fmt::Display for StatTrakMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatTrakMode::No => write!(f, "no"),
            StatTrakMode::Only => write!(f, "only"),
            StatTrakMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for StatTrakMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "no" | "false" | "off" => Ok(StatTrakMode::No),
            "y" | "yes" | "only" | "true" | "on" => Ok(StatTrakMode::Only),
            "both" | "b" => Ok(StatTrakMode::Both),
            _ => Err(format!("Unknown StatTrak mode: {}. Use: yes, no, only, both", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wear_parsing() {
        assert_eq!("1".parse::<Wear>().unwrap(), Wear::FactoryNew);
        assert_eq!("2".parse::<Wear>().unwrap(), Wear::MinimalWear);
        assert_eq!("3".parse::<Wear>().unwrap(), Wear::FieldTested);
        assert_eq!("4".parse::<Wear>().unwrap(), Wear::WellWorn);
        assert_eq!("5".parse::<Wear>().unwrap(), Wear::BattleScarred);
        assert_eq!("FT".parse::<Wear>().unwrap(), Wear::FieldTested);
        assert_eq!("Field-Tested".parse::<Wear>().unwrap(), Wear::FieldTested);
        assert_eq!("factory new".parse::<Wear>().unwrap(), Wear::FactoryNew);
        assert_eq!("well_worn".parse::<Wear>().unwrap(), Wear::WellWorn);
        assert_eq!("Minimal Wear".parse::<Wear>().unwrap(), Wear::MinimalWear);
        for wear in Wear::all() {
            assert_eq!(wear.short().parse::<Wear>().unwrap(), *wear);
            assert_eq!(wear.label().parse::<Wear>().unwrap(), *wear);
        }
        assert_eq!("battle_scarred".parse::<Wear>().unwrap(), Wear::BattleScarred);
    }

    #[test]
    fn test_wear_parse_error() {
        let err = "6".parse::<Wear>().unwrap_err();
        assert!(err.to_string().contains("Unknown wear '6'"));
        assert!("pristine".parse::<Wear>().is_err());
    }

    #[test]
    fn test_wear_labels() {
        assert_eq!(Wear::FieldTested.to_string(), "Field-Tested");
        assert_eq!(Wear::FactoryNew.suffix(), "(Factory New)");
        assert_eq!(Wear::WellWorn.short(), "WW");
        assert_eq!(Wear::BattleScarred.menu_number(), 5);
        assert_eq!(Wear::default(), Wear::FieldTested);
    }

    #[test]
    fn test_wear_from_market_name() {
        assert_eq!(
            Wear::from_market_name("AK-47 | Asiimov (Field-Tested)"),
            Some(Wear::FieldTested)
        );
        assert_eq!(
            Wear::from_market_name("StatTrak™ AWP | Hyper Beast (Minimal Wear)"),
            Some(Wear::MinimalWear)
        );
        assert_eq!(Wear::from_market_name("★ Karambit"), None);
    }

    #[test]
    fn test_wear_all_ordered() {
        let numbers: Vec<u8> = Wear::all().iter().map(|w| w.menu_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wear_serde() {
        let json = serde_json::to_string(&Wear::WellWorn).unwrap();
        assert_eq!(json, "\"Well-Worn\"");
        let parsed: Wear = serde_json::from_str("\"Minimal Wear\"").unwrap();
        assert_eq!(parsed, Wear::MinimalWear);
    }

    #[test]
    fn test_wear_selection() {
        assert_eq!("all".parse::<WearSelection>().unwrap(), WearSelection::All);
        assert_eq!("ALL".parse::<WearSelection>().unwrap(), WearSelection::All);
        assert_eq!("2".parse::<WearSelection>().unwrap(), WearSelection::One(Wear::MinimalWear));
        assert_eq!(WearSelection::All.wears().len(), 5);
        assert_eq!(WearSelection::One(Wear::WellWorn).wears(), vec![Wear::WellWorn]);
        assert!(WearSelection::All.includes(Wear::FactoryNew));
        assert!(!WearSelection::One(Wear::WellWorn).includes(Wear::FactoryNew));
        assert_eq!(WearSelection::All.to_string(), "all");
        assert_eq!(WearSelection::default().to_string(), "Field-Tested");
    }

    #[test]
    fn test_stattrak_mode_parsing() {
        assert_eq!("y".parse::<StatTrakMode>().unwrap(), StatTrakMode::Only);
        assert_eq!("yes".parse::<StatTrakMode>().unwrap(), StatTrakMode::Only);
        assert_eq!("only".parse::<StatTrakMode>().unwrap(), StatTrakMode::Only);
        assert_eq!("N".parse::<StatTrakMode>().unwrap(), StatTrakMode::No);
        assert_eq!("both".parse::<StatTrakMode>().unwrap(), StatTrakMode::Both);

        let err = "maybe".parse::<StatTrakMode>().unwrap_err();
        assert!(err.contains("yes, no, only, both"));
    }

    #[test]
    fn test_stattrak_mode_includes() {
        assert!(StatTrakMode::No.includes(false));
        assert!(!StatTrakMode::No.includes(true));
        assert!(StatTrakMode::Only.includes(true));
        assert!(!StatTrakMode::Only.includes(false));
        assert!(StatTrakMode::Both.includes(true));
        assert!(StatTrakMode::Both.includes(false));
        assert_eq!(StatTrakMode::Both.variants(), &[false, true]);
    }

    #[test]
    fn test_stattrak_mode_display() {
        assert_eq!(StatTrakMode::No.to_string(), "no");
        assert_eq!(StatTrakMode::Only.to_string(), "only");
        assert_eq!(StatTrakMode::Both.to_string(), "both");
    }
}

// Fixed catalogs: the 14 tracked A-ranks grouped into 7 zones, and the 8
// worlds a board can be kept for. Lookups are case-insensitive exact match.

/// A tracked A-rank monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    QueenHawk,
    Nechuciho,
    Raintriller,
    Pkuucha,
    StarcrierOne,
    RraxYityaOne,
    StarcrierTwo,
    RraxYityaTwo,
    Yehehetoauapyo,
    Keheniheyamewi,
    Heshuala,
    UrnaVariabilis,
    SallyTheSweeper,
    CatsEye,
}

impl Rank {
    /// All ranks in board display order (zone by zone).
    pub const ALL: [Rank; 14] = [
        Rank::QueenHawk,
        Rank::Nechuciho,
        Rank::Raintriller,
        Rank::Pkuucha,
        Rank::StarcrierOne,
        Rank::RraxYityaOne,
        Rank::StarcrierTwo,
        Rank::RraxYityaTwo,
        Rank::Yehehetoauapyo,
        Rank::Keheniheyamewi,
        Rank::Heshuala,
        Rank::UrnaVariabilis,
        Rank::SallyTheSweeper,
        Rank::CatsEye,
    ];

    /// Full in-game name, as reported by commands and the webhook.
    pub fn name(self) -> &'static str {
        match self {
            Rank::QueenHawk => "Queen Hawk",
            Rank::Nechuciho => "Nechuciho",
            Rank::Raintriller => "The Raintriller",
            Rank::Pkuucha => "Pkuucha",
            Rank::StarcrierOne => "Starcrier 1",
            Rank::RraxYityaOne => "Rrax Yity'a 1",
            Rank::StarcrierTwo => "Starcrier 2",
            Rank::RraxYityaTwo => "Rrax Yity'a 2",
            Rank::Yehehetoauapyo => "Yehehetoaua'pyo",
            Rank::Keheniheyamewi => "Keheniheyamewi",
            Rank::Heshuala => "Heshuala",
            Rank::UrnaVariabilis => "Urna Variabilis",
            Rank::SallyTheSweeper => "Sally the Sweeper",
            Rank::CatsEye => "Cat's Eye",
        }
    }

    /// Shortened name used in board cells and on button labels.
    pub fn short_name(self) -> &'static str {
        match self {
            Rank::QueenHawk => "Queen Hawk",
            Rank::Nechuciho => "Nechuciho",
            Rank::Raintriller => "Raintriller",
            Rank::Pkuucha => "Pkuucha",
            Rank::StarcrierOne => "Starcrier 1",
            Rank::RraxYityaOne => "Rrax 1",
            Rank::StarcrierTwo => "Starcrier 2",
            Rank::RraxYityaTwo => "Rrax 2",
            Rank::Yehehetoauapyo => "Yehehe",
            Rank::Keheniheyamewi => "Kehe",
            Rank::Heshuala => "Heshuala",
            Rank::UrnaVariabilis => "Urna",
            Rank::SallyTheSweeper => "Sally",
            Rank::CatsEye => "Cat's Eye",
        }
    }

    /// Case-insensitive lookup against the full name.
    pub fn from_name(name: &str) -> Option<Rank> {
        Rank::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Stable position in `ALL`, used to build button custom ids.
    pub fn index(self) -> usize {
        Rank::ALL.iter().position(|r| *r == self).unwrap()
    }

    pub fn from_index(index: usize) -> Option<Rank> {
        Rank::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A hunt zone; each zone hosts exactly two A-ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Urqopacha,
    Kozamauka,
    YakTelOne,
    YakTelTwo,
    Shaaloani,
    HeritageFound,
    LivingMemory,
}

impl Zone {
    /// All zones in board display order.
    pub const ALL: [Zone; 7] = [
        Zone::Urqopacha,
        Zone::Kozamauka,
        Zone::YakTelOne,
        Zone::YakTelTwo,
        Zone::Shaaloani,
        Zone::HeritageFound,
        Zone::LivingMemory,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Urqopacha => "Urqopacha",
            Zone::Kozamauka => "Kozama'uka",
            Zone::YakTelOne => "Yak T'el 1",
            Zone::YakTelTwo => "Yak T'el 2",
            Zone::Shaaloani => "Shaaloani",
            Zone::HeritageFound => "Heritage Found",
            Zone::LivingMemory => "Living Memory",
        }
    }

    /// The two ranks spawning in this zone, in display order.
    pub fn ranks(self) -> [Rank; 2] {
        match self {
            Zone::Urqopacha => [Rank::QueenHawk, Rank::Nechuciho],
            Zone::Kozamauka => [Rank::Raintriller, Rank::Pkuucha],
            Zone::YakTelOne => [Rank::StarcrierOne, Rank::RraxYityaOne],
            Zone::YakTelTwo => [Rank::StarcrierTwo, Rank::RraxYityaTwo],
            Zone::Shaaloani => [Rank::Yehehetoauapyo, Rank::Keheniheyamewi],
            Zone::HeritageFound => [Rank::Heshuala, Rank::UrnaVariabilis],
            Zone::LivingMemory => [Rank::SallyTheSweeper, Rank::CatsEye],
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A game world. Each tracked world gets its own timer set and board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum World {
    Halicarnassus,
    Maduin,
    Marilith,
    Seraph,
    Cuchulainn,
    Golem,
    Kraken,
    Rafflesia,
}

impl World {
    pub const ALL: [World; 8] = [
        World::Halicarnassus,
        World::Maduin,
        World::Marilith,
        World::Seraph,
        World::Cuchulainn,
        World::Golem,
        World::Kraken,
        World::Rafflesia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            World::Halicarnassus => "Halicarnassus",
            World::Maduin => "Maduin",
            World::Marilith => "Marilith",
            World::Seraph => "Seraph",
            World::Cuchulainn => "Cuchulainn",
            World::Golem => "Golem",
            World::Kraken => "Kraken",
            World::Rafflesia => "Rafflesia",
        }
    }

    /// Case-insensitive lookup against the world name.
    pub fn from_name(name: &str) -> Option<World> {
        World::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Stable position in `ALL`, used to build button custom ids.
    pub fn index(self) -> usize {
        World::ALL.iter().position(|w| *w == self).unwrap()
    }

    pub fn from_index(index: usize) -> Option<World> {
        World::ALL.get(index).copied()
    }
}

impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Rank::ALL.len(), 14);
        assert_eq!(Zone::ALL.len(), 7);
        assert_eq!(World::ALL.len(), 8);
    }

    #[test]
    fn test_zone_grouping_covers_every_rank_once() {
        let mut seen = Vec::new();
        for zone in Zone::ALL {
            for rank in zone.ranks() {
                assert!(!seen.contains(&rank), "{rank} listed twice");
                seen.push(rank);
            }
        }
        assert_eq!(seen.len(), Rank::ALL.len());
        // Zone iteration preserves the board display order
        assert_eq!(seen, Rank::ALL);
    }

    #[test]
    fn test_rank_lookup_case_insensitive() {
        assert_eq!(Rank::from_name("Queen Hawk"), Some(Rank::QueenHawk));
        assert_eq!(Rank::from_name("queen hawk"), Some(Rank::QueenHawk));
        assert_eq!(Rank::from_name("RRAX YITY'A 2"), Some(Rank::RraxYityaTwo));
        assert_eq!(Rank::from_name("  cat's eye  "), Some(Rank::CatsEye));
    }

    #[test]
    fn test_rank_lookup_unknown() {
        assert_eq!(Rank::from_name("Odin"), None);
        assert_eq!(Rank::from_name(""), None);
        // Short names are display-only, not an accepted spelling
        assert_eq!(Rank::from_name("Yehehe"), None);
    }

    #[test]
    fn test_world_lookup() {
        assert_eq!(World::from_name("Halicarnassus"), Some(World::Halicarnassus));
        assert_eq!(World::from_name("maduin"), Some(World::Maduin));
        assert_eq!(World::from_name("Ultros"), None);
    }

    #[test]
    fn test_index_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(Rank::from_index(rank.index()), Some(rank));
        }
        for world in World::ALL {
            assert_eq!(World::from_index(world.index()), Some(world));
        }
        assert_eq!(Rank::from_index(14), None);
        assert_eq!(World::from_index(8), None);
    }
}

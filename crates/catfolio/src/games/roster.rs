use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatKind {
    Good,
    Bad,
}

impl CatKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good Cat",
            Self::Bad => "Bad Cat",
        }
    }
}

/// Minigame a cat opens from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Minigame {
    StockGarden,
    SpendingSorter,
    CoinCollectorMaze,
    SnowballRoll,
    RainyDayBuilder,
    RiggedWheelDefense,
    CreditCardTrap,
    TooGoodDetective,
    LinkChecker,
    HypeResistance,
}

impl Minigame {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::StockGarden => "stock-garden",
            Self::SpendingSorter => "spending-sorter",
            Self::CoinCollectorMaze => "coin-collector-maze",
            Self::SnowballRoll => "snowball-roll",
            Self::RainyDayBuilder => "rainy-day-builder",
            Self::RiggedWheelDefense => "rigged-wheel-defense",
            Self::CreditCardTrap => "credit-card-trap",
            Self::TooGoodDetective => "too-good-detective",
            Self::LinkChecker => "link-checker",
            Self::HypeResistance => "hype-resistance",
        }
    }

    /// Only the Spending Sorter and Scam Cat (hosted by Shady) have engines.
    pub const fn playable(self) -> bool {
        matches!(self, Self::SpendingSorter | Self::TooGoodDetective)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatProfile {
    pub id: u8,
    pub name: &'static str,
    pub kind: CatKind,
    pub description: &'static str,
    pub pitch: &'static str,
    pub lesson: &'static str,
    pub minigame: Minigame,
}

/// Menu entry for the view layer.
#[derive(Debug, Clone, Serialize)]
pub struct CatCard {
    #[serde(flatten)]
    pub profile: CatProfile,
    pub kind_label: &'static str,
    pub playable: bool,
}

impl CatProfile {
    pub fn card(&self) -> CatCard {
        CatCard {
            profile: self.clone(),
            kind_label: self.kind.label(),
            playable: self.minigame.playable(),
        }
    }
}

pub fn standard_roster() -> Vec<CatProfile> {
    vec![
        CatProfile {
            id: 1,
            name: "Vesty",
            kind: CatKind::Good,
            description: "I'll teach you how to invest wisely!",
            pitch: "Let me in and I'll show you how to grow your fish over time!",
            lesson: "Good investments grow over time. Don't sell when you get scared! Be patient and don't put all your fish in one basket.",
            minigame: Minigame::StockGarden,
        },
        CatProfile {
            id: 2,
            name: "Penny",
            kind: CatKind::Good,
            description: "I'll help you budget your fish!",
            pitch: "Let me in and I'll help you organize your spending!",
            lesson: "Keep track of where your fish go! Spend half on things you need, some on things you want, and save the rest.",
            minigame: Minigame::SpendingSorter,
        },
        CatProfile {
            id: 3,
            name: "Piggy",
            kind: CatKind::Good,
            description: "I'll help you save for your goals!",
            pitch: "Let me in and I'll help you build your fish collection!",
            lesson: "Saving a little bit each day adds up to a lot! Don't buy things without thinking first.",
            minigame: Minigame::CoinCollectorMaze,
        },
        CatProfile {
            id: 4,
            name: "Snowy",
            kind: CatKind::Good,
            description: "I'll show you the magic of compound interest!",
            pitch: "Let me in and I'll show you how fish can make MORE fish!",
            lesson: "When you save your fish, they can make baby fish! The longer you wait, the more fish you'll have!",
            minigame: Minigame::SnowballRoll,
        },
        CatProfile {
            id: 5,
            name: "Emery",
            kind: CatKind::Good,
            description: "I'll help you prepare for emergencies!",
            pitch: "Let me in and I'll protect you from surprises!",
            lesson: "Save fish for real emergencies only! A broken bike is an emergency. A new video game is not.",
            minigame: Minigame::RainyDayBuilder,
        },
        CatProfile {
            id: 6,
            name: "Lotto",
            kind: CatKind::Bad,
            description: "Psst... wanna get rich quick?",
            pitch: "Just one bet! You'll totally win... trust me!",
            lesson: "Gambling is a trick to take your fish away. The game is set up so you always lose. Save and invest instead!",
            minigame: Minigame::RiggedWheelDefense,
        },
        CatProfile {
            id: 7,
            name: "Spendy",
            kind: CatKind::Bad,
            description: "Buy now, pay later! What could go wrong?",
            pitch: "Why wait when you can have it NOW? I'll let you borrow fish!",
            lesson: "Borrowing fish costs extra fish! Something that costs 100 fish might end up costing 150 fish. Save up instead!",
            minigame: Minigame::CreditCardTrap,
        },
        CatProfile {
            id: 8,
            name: "Shady",
            kind: CatKind::Bad,
            description: "You've won a FREE prize! Click here!",
            pitch: "Congratulations!!! You won 1000 fish! Claim your prize NOW!!!",
            lesson: "If something sounds too good to be true, it's a trick! Watch out for: rushing you, bad spelling, asking for fish or passwords.",
            minigame: Minigame::TooGoodDetective,
        },
        CatProfile {
            id: 9,
            name: "Clicky",
            kind: CatKind::Bad,
            description: "Your account has been hacked! Click this link!",
            pitch: "URGENT: Enter your password right now at www.fake-site.com!",
            lesson: "Never click weird links or tell anyone your password! Real companies never ask for passwords in emails. Check the website address carefully!",
            minigame: Minigame::LinkChecker,
        },
        CatProfile {
            id: 10,
            name: "Fomo",
            kind: CatKind::Bad,
            description: "EVERYONE has this! Limited time only!",
            pitch: "This is SO cool RIGHT NOW! Only 2 left! All your friends have one!",
            lesson: "Wait a day before buying something! When you're excited, you might buy things you don't really need or want.",
            minigame: Minigame::HypeResistance,
        },
    ]
}

pub fn find_cat(id: u8) -> Option<CatProfile> {
    standard_roster().into_iter().find(|cat| cat.id == id)
}

//! Message tags
//!
//! Every tokenized line starts with a tag naming the kind of message. The set
//! is closed: strings the protocol may add later parse to `None` and are
//! skipped by consumers.

/// Protocol message tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // === Room / meta ===
    Init,
    Title,
    Join,
    Leave,
    Name,
    Chat,
    Raw,
    Html,
    Uhtml,
    Timestamp,
    Timer,
    Inactive,
    InactiveOff,
    Error,
    BigError,
    Debug,
    Seed,
    Split,
    Notify,
    Badge,

    // === Battle initialization ===
    Player,
    TeamSize,
    GameType,
    Gen,
    Tier,
    Rated,
    Rule,
    ClearPoke,
    Poke,
    TeamPreview,
    ShowTeam,
    Start,

    // === Battle progress ===
    Request,
    Upkeep,
    Turn,
    Win,
    Tie,
    Message,

    // === Major actions ===
    Move,
    Switch,
    Drag,
    DetailsChange,
    Replace,
    Swap,
    Cant,
    Faint,

    // === Minor actions ===
    Fail,
    Block,
    NoTarget,
    Miss,
    Damage,
    Heal,
    SetHp,
    Status,
    CureStatus,
    CureTeam,
    Boost,
    Unboost,
    SetBoost,
    SwapBoost,
    InvertBoost,
    ClearBoost,
    ClearAllBoost,
    ClearPositiveBoost,
    ClearNegativeBoost,
    CopyBoost,
    Weather,
    FieldStart,
    FieldEnd,
    FieldActivate,
    SideStart,
    SideEnd,
    SwapSideConditions,
    VolatileStart,
    VolatileEnd,
    Crit,
    SuperEffective,
    Resisted,
    Immune,
    Item,
    EndItem,
    Ability,
    EndAbility,
    Transform,
    Mega,
    Primal,
    Burst,
    ZPower,
    ZBroken,
    Activate,
    Hint,
    Center,
    MinorMessage,
    Combine,
    Waiting,
    Prepare,
    MustRecharge,
    Nothing,
    HitCount,
    SingleMove,
    SingleTurn,
    FormeChange,
    Terastallize,
    Anim,
}

impl Tag {
    /// Parse a tag string; unknown or empty tags yield `None`
    pub fn from_protocol(s: &str) -> Option<Self> {
        let tag = match s {
            "init" => Tag::Init,
            "title" => Tag::Title,
            "j" | "J" | "join" => Tag::Join,
            "l" | "L" | "leave" => Tag::Leave,
            "n" | "N" | "name" => Tag::Name,
            "c" | "c:" | "chat" => Tag::Chat,
            "raw" => Tag::Raw,
            "html" => Tag::Html,
            "uhtml" | "uhtmlchange" => Tag::Uhtml,
            "t:" => Tag::Timestamp,
            "timer" => Tag::Timer,
            "inactive" => Tag::Inactive,
            "inactiveoff" => Tag::InactiveOff,
            "error" => Tag::Error,
            "bigerror" => Tag::BigError,
            "debug" => Tag::Debug,
            "seed" => Tag::Seed,
            "split" => Tag::Split,
            "notify" => Tag::Notify,
            "badge" => Tag::Badge,

            "player" => Tag::Player,
            "teamsize" => Tag::TeamSize,
            "gametype" => Tag::GameType,
            "gen" => Tag::Gen,
            "tier" => Tag::Tier,
            "rated" => Tag::Rated,
            "rule" => Tag::Rule,
            "clearpoke" => Tag::ClearPoke,
            "poke" => Tag::Poke,
            "teampreview" => Tag::TeamPreview,
            "showteam" => Tag::ShowTeam,
            "start" => Tag::Start,

            "request" => Tag::Request,
            "upkeep" => Tag::Upkeep,
            "turn" => Tag::Turn,
            "win" => Tag::Win,
            "tie" => Tag::Tie,
            "message" => Tag::Message,

            "move" => Tag::Move,
            "switch" => Tag::Switch,
            "drag" => Tag::Drag,
            "detailschange" => Tag::DetailsChange,
            "replace" => Tag::Replace,
            "swap" => Tag::Swap,
            "cant" => Tag::Cant,
            "faint" => Tag::Faint,

            "-fail" => Tag::Fail,
            "-block" => Tag::Block,
            "-notarget" => Tag::NoTarget,
            "-miss" => Tag::Miss,
            "-damage" => Tag::Damage,
            "-heal" => Tag::Heal,
            "-sethp" => Tag::SetHp,
            "-status" => Tag::Status,
            "-curestatus" => Tag::CureStatus,
            "-cureteam" => Tag::CureTeam,
            "-boost" => Tag::Boost,
            "-unboost" => Tag::Unboost,
            "-setboost" => Tag::SetBoost,
            "-swapboost" => Tag::SwapBoost,
            "-invertboost" => Tag::InvertBoost,
            "-clearboost" => Tag::ClearBoost,
            "-clearallboost" => Tag::ClearAllBoost,
            "-clearpositiveboost" => Tag::ClearPositiveBoost,
            "-clearnegativeboost" => Tag::ClearNegativeBoost,
            "-copyboost" => Tag::CopyBoost,
            "-weather" => Tag::Weather,
            "-fieldstart" => Tag::FieldStart,
            "-fieldend" => Tag::FieldEnd,
            "-fieldactivate" => Tag::FieldActivate,
            "-sidestart" => Tag::SideStart,
            "-sideend" => Tag::SideEnd,
            "-swapsideconditions" => Tag::SwapSideConditions,
            "-start" => Tag::VolatileStart,
            "-end" => Tag::VolatileEnd,
            "-crit" => Tag::Crit,
            "-supereffective" => Tag::SuperEffective,
            "-resisted" => Tag::Resisted,
            "-immune" => Tag::Immune,
            "-item" => Tag::Item,
            "-enditem" => Tag::EndItem,
            "-ability" => Tag::Ability,
            "-endability" => Tag::EndAbility,
            "-transform" => Tag::Transform,
            "-mega" => Tag::Mega,
            "-primal" => Tag::Primal,
            "-burst" => Tag::Burst,
            "-zpower" => Tag::ZPower,
            "-zbroken" => Tag::ZBroken,
            "-activate" => Tag::Activate,
            "-hint" => Tag::Hint,
            "-center" => Tag::Center,
            "-message" => Tag::MinorMessage,
            "-combine" => Tag::Combine,
            "-waiting" => Tag::Waiting,
            "-prepare" => Tag::Prepare,
            "-mustrecharge" => Tag::MustRecharge,
            "-nothing" => Tag::Nothing,
            "-hitcount" => Tag::HitCount,
            "-singlemove" => Tag::SingleMove,
            "-singleturn" => Tag::SingleTurn,
            "-formechange" => Tag::FormeChange,
            "-terastallize" => Tag::Terastallize,
            "-anim" => Tag::Anim,

            _ => return None,
        };
        Some(tag)
    }

    /// Minor actions are the `-`-prefixed secondary effects of a major action
    pub fn is_minor(&self) -> bool {
        matches!(
            self,
            Tag::Fail
                | Tag::Block
                | Tag::NoTarget
                | Tag::Miss
                | Tag::Damage
                | Tag::Heal
                | Tag::SetHp
                | Tag::Status
                | Tag::CureStatus
                | Tag::CureTeam
                | Tag::Boost
                | Tag::Unboost
                | Tag::SetBoost
                | Tag::SwapBoost
                | Tag::InvertBoost
                | Tag::ClearBoost
                | Tag::ClearAllBoost
                | Tag::ClearPositiveBoost
                | Tag::ClearNegativeBoost
                | Tag::CopyBoost
                | Tag::Weather
                | Tag::FieldStart
                | Tag::FieldEnd
                | Tag::FieldActivate
                | Tag::SideStart
                | Tag::SideEnd
                | Tag::SwapSideConditions
                | Tag::VolatileStart
                | Tag::VolatileEnd
                | Tag::Crit
                | Tag::SuperEffective
                | Tag::Resisted
                | Tag::Immune
                | Tag::Item
                | Tag::EndItem
                | Tag::Ability
                | Tag::EndAbility
                | Tag::Transform
                | Tag::Mega
                | Tag::Primal
                | Tag::Burst
                | Tag::ZPower
                | Tag::ZBroken
                | Tag::Activate
                | Tag::Hint
                | Tag::Center
                | Tag::MinorMessage
                | Tag::Combine
                | Tag::Waiting
                | Tag::Prepare
                | Tag::MustRecharge
                | Tag::Nothing
                | Tag::HitCount
                | Tag::SingleMove
                | Tag::SingleTurn
                | Tag::FormeChange
                | Tag::Terastallize
                | Tag::Anim
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol() {
        assert_eq!(Tag::from_protocol("switch"), Some(Tag::Switch));
        assert_eq!(Tag::from_protocol("-damage"), Some(Tag::Damage));
        assert_eq!(Tag::from_protocol("-start"), Some(Tag::VolatileStart));
        assert_eq!(Tag::from_protocol("t:"), Some(Tag::Timestamp));
        assert_eq!(Tag::from_protocol("J"), Some(Tag::Join));
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(Tag::from_protocol(""), None);
        assert_eq!(Tag::from_protocol("-brandnewthing"), None);
        assert_eq!(Tag::from_protocol("Switch"), None);
    }

    #[test]
    fn test_minor_tags_are_dash_prefixed() {
        for s in ["-damage", "-sidestart", "-terastallize", "-message"] {
            assert!(Tag::from_protocol(s).unwrap().is_minor(), "{s}");
        }
        for s in ["move", "switch", "faint", "turn", "t:", "message"] {
            assert!(!Tag::from_protocol(s).unwrap().is_minor(), "{s}");
        }
    }
}

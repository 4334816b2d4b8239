use proptest::prelude::*;
use recap_protocol::{GameType, Player};

use crate::{AnalyzeError, AnalyzerConfig, ReplayAnalysis, StaticDex, analyze, analyze_with};

fn run(log: &str) -> ReplayAnalysis {
    analyze(log, &StaticDex).unwrap()
}

const FULL_BATTLE: &str = "\
|j|☆Alice
|j|☆Bob
|player|p1|Alice|2|1500
|player|p2|Bob|1|1500
|teamsize|p1|2
|teamsize|p2|2
|gametype|singles
|gen|9
|tier|[Gen 9] OU
|poke|p1|Landorus-Therian, M|
|poke|p1|Pikachu, F|
|poke|p2|Garchomp, F|
|poke|p2|Ferrothorn, M|
|teampreview
|
|t:|1700000000
|start
|switch|p1a: Lando|Landorus-Therian, M, shiny|100/100
|switch|p2a: Ferro|Ferrothorn, M|100/100
|turn|1
|
|t:|1700000030
|move|p1a: Lando|Stealth Rock|p2a: Ferro
|-sidestart|p2: Bob|move: Stealth Rock
|move|p2a: Ferro|Leech Seed|p1a: Lando
|-start|p1a: Lando|move: Leech Seed
|
|-damage|p1a: Lando|88/100|[from] Leech Seed|[of] p2a: Ferro
|-heal|p2a: Ferro|100/100|[silent]
|upkeep
|turn|2
|
|t:|1700000060
|switch|p2a: Chomp|Garchomp, F|100/100
|-damage|p2a: Chomp|88/100|[from] Stealth Rock
|move|p1a: Lando|Stone Edge|p2a: Chomp
|-crit|p2a: Chomp
|-damage|p2a: Chomp|0 fnt
|faint|p2a: Chomp
|upkeep
|
|t:|1700000090
|switch|p2a: Ferro|Ferrothorn, M|100/100
|-damage|p2a: Ferro|88/100|[from] Stealth Rock
|turn|3
|
|t:|1700000120
|-terastallize|p1a: Lando|Flying
|move|p1a: Lando|Earthquake|p2a: Ferro
|-damage|p2a: Ferro|0 fnt
|faint|p2a: Ferro
|
|win|Alice
";

#[test]
fn test_full_battle_summary() {
    let analysis = run(FULL_BATTLE);

    assert_eq!(analysis.game_type, Some(GameType::Singles));
    assert_eq!(analysis.generation, Some(9));
    assert_eq!(analysis.turns, 3);
    assert_eq!(analysis.game_time, 120);

    let alice = analysis.player("Alice").unwrap();
    let bob = analysis.player("Bob").unwrap();
    assert!(alice.win);
    assert!(!bob.win);
    assert_eq!(alice.team_size, Some(2));
    assert_eq!(alice.total_kills, 2);
    assert_eq!(alice.total_deaths, 0);
    assert_eq!(bob.total_kills, 0);
    assert_eq!(bob.total_deaths, 2);
}

#[test]
fn test_full_battle_rosters() {
    let analysis = run(FULL_BATTLE);
    let alice = analysis.player("Alice").unwrap();
    let bob = analysis.player("Bob").unwrap();

    assert_eq!(alice.team.len(), 2);
    assert_eq!(bob.team.len(), 2);

    let lando = &alice.team[0];
    assert!(lando.brought);
    assert_eq!(lando.nickname.as_deref(), Some("Lando"));
    assert_eq!(lando.detail, "Landorus-Therian, M, shiny, tera:Flying");
    assert_eq!(lando.tera_type.as_deref(), Some("Flying"));
    assert_eq!(lando.kills.direct, 2);
    assert_eq!(lando.kills.indirect, 0);
    assert_eq!(lando.damage_dealt, 200.0);
    assert_eq!(lando.damage_taken, 12.0);

    let pikachu = &alice.team[1];
    assert!(!pikachu.brought);
    assert!(pikachu.nickname.is_none());

    let ferro = &bob.team[1];
    assert!(ferro.fainted);
    assert_eq!(ferro.damage_dealt, 12.0);
    assert_eq!(ferro.damage_taken, 100.0);
}

#[test]
fn test_full_battle_events() {
    let analysis = run(FULL_BATTLE);
    let messages: Vec<&str> = analysis.events.iter().map(|e| e.message.as_str()).collect();

    assert_eq!(
        messages,
        vec![
            "Landorus-Therian set Stealth Rock on Bob's side",
            "Garchomp fainted from Stone Edge, directly by Landorus-Therian",
            "Landorus-Therian terastallized into the Flying type",
            "Ferrothorn fainted from Earthquake, directly by Landorus-Therian",
            "Alice wins the battle!",
        ]
    );
    let turns: Vec<u32> = analysis.events.iter().map(|e| e.turn).collect();
    assert_eq!(turns, vec![1, 2, 3, 3, 3]);
    assert_eq!(analysis.events[1].player, Some(Player::P2));
    assert_eq!(analysis.events[4].player, Some(Player::P1));
}

#[test]
fn test_stealth_rock_indirect_kill() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Lando|Landorus-Therian, M|100/100
|switch|p2a: Chomp|Garchomp, F|100/100
|turn|1
|move|p1a: Lando|Stealth Rock|p2a: Chomp
|-sidestart|p2: Bob|move: Stealth Rock
|move|p2a: Chomp|Protect|p2a: Chomp
|turn|2
|switch|p2a: Zard|Charizard, M|10/100
|-damage|p2a: Zard|0 fnt|[from] Stealth Rock
|faint|p2a: Zard
");
    let lando = &analysis.stats[0].team[0];
    assert_eq!(lando.kills.indirect, 1);
    assert_eq!(lando.kills.direct, 0);
    assert_eq!(analysis.stats[0].total_kills, 1);

    let faint = analysis.events.last().unwrap();
    assert_eq!(faint.player, Some(Player::P2));
    assert!(faint.message.contains("indirectly by Landorus-Therian"));
    assert!(faint.message.contains("Stealth Rock"));
}

#[test]
fn test_direct_kill_without_annotation() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Chompy|Garchomp, F|100/100
|switch|p2a: Bolt|Zapdos|100/100
|turn|1
|move|p1a: Chompy|Stone Edge|p2a: Bolt
|-damage|p2a: Bolt|0 fnt
|faint|p2a: Bolt
");
    assert_eq!(analysis.stats[0].team[0].kills.direct, 1);
    assert_eq!(analysis.stats[1].total_deaths, 1);
}

#[test]
fn test_team_preview_promotion() {
    let analysis = run("\
|poke|p1|Landorus-Therian, M|
|switch|p1a: Lando|Landorus-Therian, M, shiny|100/100
");
    let team = &analysis.stats[0].team;
    assert_eq!(team.len(), 1);
    assert!(team[0].brought);
}

#[test]
fn test_minimal_win() {
    let analysis = run("player|p1|Alice|...\nwin|Alice");

    assert!(analysis.stats[0].win);
    assert_eq!(analysis.events.len(), 1);
    assert!(analysis.events[0].message.contains("Alice wins"));
}

#[test]
fn test_self_ko_credits_no_one() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Weezing|Weezing-Galar|100/100
|switch|p2a: Chomp|Garchomp, F|100/100
|turn|1
|move|p1a: Weezing|Misty Explosion|p2a: Chomp
|-damage|p2a: Chomp|0 fnt
|faint|p2a: Chomp
|faint|p1a: Weezing
");
    let weezing = &analysis.stats[0].team[0];
    assert!(weezing.fainted);
    assert_eq!(weezing.kills.direct, 1);
    assert_eq!(analysis.stats[1].total_kills, 0);
    assert_eq!(
        analysis.events.last().unwrap().message,
        "Weezing-Galar fainted from Misty Explosion"
    );
}

#[test]
fn test_toxic_indirect_kill() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Toxapex|Toxapex|100/100
|switch|p2a: Chomp|Garchomp, F|100/100
|turn|1
|move|p1a: Toxapex|Toxic|p2a: Chomp
|-status|p2a: Chomp|tox
|
|-damage|p2a: Chomp|6/100 tox|[from] psn
|turn|2
|
|-damage|p2a: Chomp|0 fnt|[from] psn
|faint|p2a: Chomp
");
    let toxapex = &analysis.stats[0].team[0];
    assert_eq!(toxapex.kills.indirect, 1);
    assert_eq!(toxapex.damage_dealt, 100.0);
}

#[test]
fn test_life_orb_faint_is_self_inflicted() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Chomp|Garchomp, F|100/100
|switch|p2a: Bolt|Zapdos|100/100
|move|p1a: Chomp|Earthquake|p2a: Bolt
|-immune|p2a: Bolt
|-damage|p1a: Chomp|0 fnt|[from] item: Life Orb
|faint|p1a: Chomp
");
    assert_eq!(analysis.stats[1].total_kills, 0);
    assert_eq!(analysis.stats[0].total_deaths, 1);
    assert_eq!(
        analysis.events[0].message,
        "Garchomp fainted from Life Orb"
    );
}

#[test]
fn test_forfeit_event() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|turn|4
|-message|Bob forfeited.
|
|win|Alice
");
    assert_eq!(analysis.events.len(), 2);
    assert_eq!(analysis.events[0].player, Some(Player::P2));
    assert_eq!(analysis.events[0].turn, 4);
}

#[test]
fn test_replacement_fainting_without_damage_is_not_a_kill() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Lando|Landorus-Therian, M|100/100
|switch|p2a: Chomp|Garchomp, F|100/100
|turn|1
|move|p1a: Lando|Earthquake|p2a: Chomp
|-damage|p2a: Chomp|0 fnt
|faint|p2a: Chomp
|
|switch|p2a: Ferro|Ferrothorn|100/100
|turn|2
|move|p2a: Ferro|Perish Song|p2a: Ferro
|-start|p2a: Ferro|perish3
|-start|p1a: Lando|perish3
|
|turn|3
|move|p1a: Lando|Swords Dance|p1a: Lando
|-boost|p1a: Lando|atk|2
|
|-start|p2a: Ferro|perish0
|faint|p2a: Ferro
");
    let lando = &analysis.stats[0].team[0];
    assert_eq!(lando.kills.direct, 1);
    assert_eq!(analysis.stats[0].total_kills, 1);
    assert_eq!(analysis.stats[1].total_deaths, 2);
    assert_eq!(analysis.events.last().unwrap().message, "Ferrothorn fainted");
}

#[test]
fn test_revival_blessing_heals_benched_pokemon() {
    let analysis = run("\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Pika|Pikachu|100/100
|switch|p2a: Chomp|Garchomp, F|100/100
|move|p2a: Chomp|Earthquake|p1a: Pika
|-damage|p1a: Pika|0 fnt
|faint|p1a: Pika
|switch|p1a: Pawmot|Pawmot|100/100
|move|p1a: Pawmot|Revival Blessing|p1a: Pawmot
|-heal|p1: Pika|50/100|[from] move: Revival Blessing
");
    let pika = &analysis.stats[0].team[0];
    assert!(!pika.fainted);
    assert_eq!(pika.hp, 50.0);
    assert_eq!(pika.hp_restored, 50.0);
    assert_eq!(analysis.stats[1].total_kills, 1);
}

#[test]
fn test_garbage_lines_are_skipped() {
    let analysis = run("\
|player|p1|Alice|
|switch|p9a: Nobody|Missingno|100/100
|-damage|p1a: Ghost|50/100
|faint|p2a: Ghost
|turn|abc
|-sidestart|nobody|Spikes
|brandnewtag|1|2|3
not a protocol line at all
|raw|<div>Alice's rating: 1500
Bob's rating: 1400</div>
|win|Alice
");
    assert!(analysis.stats[0].win);
    assert_eq!(analysis.turns, 0);
    assert_eq!(analysis.events.len(), 1);
}

#[test]
fn test_limits() {
    let config = AnalyzerConfig {
        max_transcript_bytes: 16,
        max_messages: 2,
    };
    assert!(matches!(
        analyze_with(FULL_BATTLE, &StaticDex, &config),
        Err(AnalyzeError::TranscriptTooLarge { unit: "bytes", .. })
    ));

    let config = AnalyzerConfig {
        max_transcript_bytes: 1024,
        max_messages: 2,
    };
    assert!(matches!(
        analyze_with("|turn|1\n|turn|2\n|turn|3", &StaticDex, &config),
        Err(AnalyzeError::TranscriptTooLarge { unit: "messages", .. })
    ));
}

// === Properties ===

const IDENTS: &[&str] = &[
    "p1a: Lando",
    "p1a: Zard",
    "p1b: Pika",
    "p2a: Chomp",
    "p2a: Ferro",
    "p1: Lando",
    "p3a: Ghost",
];

const DETAILS: &[&str] = &[
    "Landorus-Therian, M",
    "Charizard, M",
    "Pikachu, F",
    "Garchomp, F",
    "Ferrothorn",
];

const EFFECTS: &[&str] = &[
    "",
    "|[from] Stealth Rock",
    "|[from] psn",
    "|[from] Recoil",
    "|[from] Sandstorm",
    "|[from] item: Rocky Helmet|[of] p2a: Ferro",
];

fn hp_strategy() -> impl Strategy<Value = String> {
    (0u32..=100).prop_map(|hp| {
        if hp == 0 {
            "0 fnt".to_string()
        } else {
            format!("{hp}/100")
        }
    })
}

fn line_strategy() -> impl Strategy<Value = String> {
    let ident = || prop::sample::select(IDENTS);
    let detail = || prop::sample::select(DETAILS);
    let effect = prop::sample::select(EFFECTS);

    prop_oneof![
        (0u32..30).prop_map(|turn| format!("|turn|{turn}")),
        (0u64..10_000).prop_map(|t| format!("|t:|{t}")),
        detail().prop_map(|d| format!("|poke|p1|{d}|")),
        (ident(), detail()).prop_map(|(i, d)| format!("|switch|{i}|{d}|100/100")),
        (ident(), ident()).prop_map(|(a, b)| format!("|move|{a}|Earthquake|{b}")),
        (ident(), hp_strategy(), effect).prop_map(|(i, hp, e)| format!("|-damage|{i}|{hp}{e}")),
        (ident(), hp_strategy()).prop_map(|(i, hp)| format!("|-heal|{i}|{hp}")),
        ident().prop_map(|i| format!("|faint|{i}")),
        Just("|-sidestart|p2: Bob|move: Stealth Rock".to_string()),
        Just("|-weather|Sandstorm".to_string()),
        ident().prop_map(|i| format!("|-status|{i}|tox")),
        Just("|win|Alice".to_string()),
        "[ -~]{0,30}",
    ]
}

fn transcript_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..120).prop_map(|lines| {
        format!("|player|p1|Alice|\n|player|p2|Bob|\n{}", lines.join("\n"))
    })
}

proptest! {
    #[test]
    fn prop_deaths_never_exceed_roster(log in transcript_strategy()) {
        let analysis = run(&log);
        for player in &analysis.stats {
            prop_assert!(player.total_deaths as usize <= player.team.len());
        }
    }

    #[test]
    fn prop_event_turns_non_decreasing(log in transcript_strategy()) {
        let analysis = run(&log);
        for pair in analysis.events.windows(2) {
            prop_assert!(pair[0].turn <= pair[1].turn);
        }
    }

    #[test]
    fn prop_analysis_is_deterministic(log in transcript_strategy()) {
        prop_assert_eq!(run(&log), run(&log));
    }

    #[test]
    fn prop_kills_never_exceed_opposing_faints(log in transcript_strategy()) {
        let analysis = run(&log);
        for player in &analysis.stats {
            let opposing_faints = analysis
                .events
                .iter()
                .filter(|e| e.player.is_some_and(|p| p != player.player))
                .filter(|e| e.message.contains(" fainted"))
                .count();
            prop_assert!(player.total_kills as usize <= opposing_faints);
        }
    }

    #[test]
    fn prop_hp_stays_in_range(log in transcript_strategy()) {
        let analysis = run(&log);
        for record in analysis.stats.iter().flat_map(|p| &p.team) {
            prop_assert!((0.0..=100.0).contains(&record.hp));
            prop_assert!(record.damage_taken >= 0.0);
            prop_assert!(record.damage_dealt >= 0.0);
        }
    }
}

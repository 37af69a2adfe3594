use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use chaupar::board::{BoardTopology, Coordinate, Player, ALL_PLAYERS};
use chaupar::config::EngineConfig;
use chaupar::replay::{compare_log_orders, replay_history, HistoryFile};
use chaupar::rules::measure;
use chaupar::turn::{evaluate_turn, DiceLogEntry, GameStateSnapshot, Piece};

/// A game where Red's piece walks the whole path, one snapshot per roll.
fn walking_game(topo: &BoardTopology) -> Vec<GameStateSnapshot> {
    let path = topo.path(Player::One);
    let mut log = Vec::new();
    let mut snapshots = Vec::new();
    let mut index = 0;
    let mut roll = 0u8;
    while index < path.len() {
        let mut s = GameStateSnapshot {
            current_player: Some(Player::One),
            dice_log: log.clone(),
            ..Default::default()
        };
        s.pieces.insert(Player::One, vec![Piece::new("R1", path[index].clone())]);
        snapshots.push(s);

        let d1 = roll % 6 + 1;
        let d2 = (roll / 6) % 6 + 1;
        roll = roll.wrapping_add(1);
        log.push(DiceLogEntry {
            dice1: d1,
            dice2: d2,
            sum: d1 + d2,
            player: Some(Player::One),
            color: None,
        });
        index += usize::from(d1);
    }
    snapshots
}

fn bench_classify_board(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let cells: Vec<Coordinate> = (b'A'..=b'K')
        .flat_map(|col| (1..=11).map(move |row| Coordinate::new(format!("{}{}", col as char, row))))
        .collect();
    c.bench_function("classify_121_cells_4_players", |b| {
        b.iter(|| {
            for player in ALL_PLAYERS {
                for cell in &cells {
                    black_box(topo.classify(black_box(cell), player));
                }
            }
        })
    });
}

fn bench_distance(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let from = Coordinate::new("C9");
    let to = Coordinate::new("F8");
    c.bench_function("distance_prison_to_home", |b| {
        b.iter(|| measure(&topo, black_box(&from), black_box(&to), Player::One))
    });
}

fn bench_evaluate_turn(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let config = EngineConfig::default();
    let game = walking_game(&topo);
    c.bench_function("evaluate_single_turn", |b| {
        b.iter(|| evaluate_turn(&topo, &config, Some(black_box(&game[0])), black_box(&game[1])))
    });
}

fn bench_replay(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let config = EngineConfig::default();
    let game = walking_game(&topo);
    let history = HistoryFile {
        games: vec![game.clone(); 64],
    };

    let mut group = c.benchmark_group("replay");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(5));
    group.bench_function("single_game", |b| {
        b.iter(|| replay_history(&topo, &config, black_box(&game)))
    });
    group.bench_function("audit_64_games", |b| {
        b.iter(|| compare_log_orders(&topo, &config, black_box(&history)))
    });
    group.finish();
}

fn bench_snapshot_parse(c: &mut Criterion) {
    let topo = BoardTopology::standard();
    let game = walking_game(&topo);
    let json = serde_json::to_string(&game[game.len() - 1]).unwrap_or_default();
    c.bench_function("snapshot_parse", |b| {
        b.iter(|| GameStateSnapshot::from_json_str(black_box(&json)))
    });
}

criterion_group!(
    benches,
    bench_classify_board,
    bench_distance,
    bench_evaluate_turn,
    bench_replay,
    bench_snapshot_parse,
);
criterion_main!(benches);

use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::time::Duration;

use engine::SessionRng;
use engine::board::{HazardLayout, TileKind, find_connected, generate_board};
use engine::session::{ClickResult, GameSession, LevelConfig, SessionStatus};

fn bench_config() -> LevelConfig {
    LevelConfig {
        level_number: 1,
        rows: 10,
        cols: 9,
        moves: 50,
        palette: TileKind::COLORS.to_vec(),
        targets: BTreeMap::from([(TileKind::Red, 10_000)]),
        hazards: HazardLayout {
            crates: 5,
            stones: 4,
            obsidians: 2,
            ice: 3,
            chains: 3,
            balloons: 3,
            jelly: 3,
            cages: 2,
            honey: 2,
            vortices: 1,
        },
        ice_spread_rate: 0.15,
        power_ups: Default::default(),
        combo: Default::default(),
        credit_hazard_targets: false,
    }
}

fn bench_generate_board() {
    let config = bench_config();
    let mut rng = SessionRng::from_random();
    generate_board(
        config.rows,
        config.cols,
        &config.palette,
        &config.hazards,
        &mut rng,
    );
}

fn bench_flood_fill_full_board() {
    let mut rng = SessionRng::from_random();
    let grid = generate_board(10, 9, &TileKind::COLORS, &HazardLayout::default(), &mut rng);
    for pos in grid.positions() {
        find_connected(&grid, pos);
    }
}

fn bench_full_session() {
    let mut session = GameSession::start(bench_config(), rand::random()).expect("valid config");

    let mut now = 0;
    while session.status() == SessionStatus::Idle {
        let clickable = session.grid().positions().find(|&p| {
            let tile = session.grid().get(p);
            !tile.frozen
                && (tile.power_up.is_some() || find_connected(session.grid(), p).len() >= 2)
        });
        let Some(pos) = clickable else { break };
        now += 500;
        if !matches!(
            session.handle_click_at(pos, now),
            ClickResult::Resolved(_)
        ) {
            break;
        }
    }
}

fn board_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("board");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(20)
        .measurement_time(Duration::from_secs(30));

    group.bench_function("generate_board", |b| b.iter(bench_generate_board));

    group.bench_function("flood_fill_full_board", |b| {
        b.iter(bench_flood_fill_full_board)
    });

    group.bench_function("full_session", |b| b.iter(bench_full_session));

    group.finish();
}

criterion_group!(benches, board_bench);
criterion_main!(benches);

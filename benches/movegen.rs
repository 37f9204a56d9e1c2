//! Move generation, transition and termination micro-benchmarks on a
//! classic 20×20 four-player board.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use blokus_core::{Blokus, BoardState, GameConfig, Player};

/// Deterministic mid-game position: each turn plays a fixed-stride pick
/// from the legal actions.
fn mid_game(game: &Blokus, plies: usize) -> (BoardState, Player) {
    let mut state = game.reset().unwrap();
    let mut player = game.config().players[0];
    for i in 0..plies {
        let actions = game.legal_actions(&state, player).unwrap();
        if actions.is_empty() {
            player = state.next_player(player).unwrap();
            continue;
        }
        let result = game.step(&state, player, &actions[(i * 7) % actions.len()]).unwrap();
        if result.done {
            return (result.state, result.next_player);
        }
        state = result.state;
        player = result.next_player;
    }
    (state, player)
}

fn bench_legal_actions(c: &mut Criterion) {
    let game = Blokus::standard(GameConfig::default()).unwrap();
    let opening = game.reset().unwrap();
    let (middle, player) = mid_game(&game, 24);

    c.bench_function("movegen.legal_actions.opening", |b| {
        b.iter(|| black_box(game.legal_actions(&opening, Player::ONE).unwrap()))
    });
    c.bench_function("movegen.legal_actions.mid_game", |b| {
        b.iter(|| black_box(game.legal_actions(&middle, player).unwrap()))
    });
}

fn bench_step(c: &mut Criterion) {
    let game = Blokus::standard(GameConfig::default()).unwrap();
    let (middle, player) = mid_game(&game, 24);
    let actions = game.legal_actions(&middle, player).unwrap();

    c.bench_function("transition.step.mid_game", |b| {
        b.iter_batched(
            || middle.clone(),
            |state| {
                for a in actions.iter().take(16) {
                    black_box(game.step(&state, player, a).unwrap());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_is_terminal(c: &mut Criterion) {
    let game = Blokus::standard(GameConfig::default()).unwrap();
    let (middle, _) = mid_game(&game, 40);

    c.bench_function("transition.is_terminal.mid_game", |b| {
        b.iter(|| black_box(game.is_terminal(&middle)))
    });
}

criterion_group!(benches, bench_legal_actions, bench_step, bench_is_terminal);
criterion_main!(benches);

//! A fake game frame with enough structure to make the reports interesting:
//! namespaced span names, a recursive call, repeated calls at one level and
//! a periodic spike that blows the frame budget.

use std::thread::sleep;
use std::time::Duration;

use frame_profiler_core::{profile_function, profile_log_scope, profile_scope};

const SPIKE_EVERY: u64 = 45;

fn work(micros: u64) {
    sleep(Duration::from_micros(micros));
}

pub fn simulate_frame(frame_number: u64) {
    profile_scope!("Game::RunFrame");
    poll_input();
    update(frame_number);
    render(frame_number);
}

fn poll_input() {
    profile_function!();
    work(150);
}

fn update(frame_number: u64) {
    profile_scope!("Game::Update");
    {
        profile_scope!("Physics::Step");
        let substeps = if frame_number % SPIKE_EVERY == 0 { 12 } else { 2 };
        for _ in 0..substeps {
            profile_scope!("Physics::Integrate");
            work(900);
        }
    }
    {
        profile_scope!("Audio::Mix");
        work(300);
    }
    if frame_number % 60 == 1 {
        profile_log_scope!("Terrain::Rebuild");
        profile_scope!("Terrain::Rebuild");
        build_chunk(3);
    }
}

fn build_chunk(depth: u32) {
    profile_scope!("Terrain::BuildChunk");
    work(100);
    if depth > 0 {
        build_chunk(depth - 1);
        build_chunk(depth - 1);
    }
}

fn render(frame_number: u64) {
    profile_scope!("Renderer::DrawScene");
    for pass in ["Renderer::Shadows", "Renderer::Opaque", "Renderer::Transparent"] {
        profile_scope!(pass);
        work(if frame_number % 2 == 0 { 1_200 } else { 1_000 });
    }
    profile_scope!("Renderer::Present");
    work(400);
}

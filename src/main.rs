use fringe_unwrap::image::ImageF64;
use fringe_unwrap::stack::FrameStack;
use fringe_unwrap::{FringeUnwrapper, UnwrapParams};

fn main() {
    // Demo stub: runs the pipeline on a synthetic all-dark stack
    let params = UnwrapParams {
        gc_patterns_x: 3,
        gc_patterns_y: 3,
        sine_patterns_x: 8,
        sine_patterns_y: 8,
        ..Default::default()
    };
    let frames: Vec<ImageF64> = (0..params.layout().total_frames())
        .map(|_| ImageF64::new(64, 48))
        .collect();
    let stack = FrameStack::new(frames).expect("uniform synthetic frames");

    let unwrapper = FringeUnwrapper::new(params);
    match unwrapper.process(&stack) {
        Ok(res) => println!(
            "valid_x={}/{} valid_y={}/{} latency_ms={:.3}",
            res.x.phase.valid_count(),
            res.x.phase.len(),
            res.y.phase.valid_count(),
            res.y.phase.len(),
            res.latency_ms
        ),
        Err(err) => eprintln!("Error: {err}"),
    }
}

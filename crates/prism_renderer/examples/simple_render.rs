//! Simple ray tracer example.
//!
//! Renders a small built-in scene and saves it as PNG.

use prism_core::{load_scene_from_string, RenderSettings};
use prism_renderer::{render_parallel, AbortHandle};

const SCENE: &str = r#"
// A red ball on a grey floor, with a blue triangle behind it
camera {
    location <0, 2, -8>
    angle 50
    look_at <0, 0.5, 0>
}

light_source { <5, 10, -10>, rgb <1, 1, 1> }
light_source { <-8, 4, -4>, rgb <0.3, 0.3, 0.4> }

plane { y, 1 pigment { rgb <0.6, 0.6, 0.6> } }

sphere { <0, 0.5, 0>, 1.5
    texture { pigment { rgb <0.9, 0.2, 0.15> } }
}

triangle { <-4, -1, 4>, <4, -1, 4>, <0, 5, 4>
    texture { pigment { rgb <0.2, 0.3, 0.9> } }
}
"#;

fn main() {
    env_logger::init();

    println!("Prism Ray Tracer - Simple Example");
    println!("=================================");

    let classified = load_scene_from_string(SCENE).expect("Built-in scene should parse");
    let settings = RenderSettings::new(800, 450);

    println!("Rendering {}x{}...", settings.width, settings.height);

    let start = std::time::Instant::now();
    let framebuffer = render_parallel(&classified.scene, &settings, &AbortHandle::new())
        .expect("Built-in scene should be renderable");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    framebuffer.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

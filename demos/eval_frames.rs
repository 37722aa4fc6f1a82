use framecast::{
    CompositionBuilder, DelayDef, EntityKind, Evaluator, Fps, FrameIndex, GroupBuilder,
    SceneBuilder, TimelineConfig,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let timeline = TimelineConfig::new(Fps::new(30, 1)?, 4.0, 0.5, 2);
    let comp = CompositionBuilder::new(timeline)
        .scene(
            SceneBuilder::new("intro")
                .single("headline", DelayDef::Frames(2), EntityKind::Title)
                .group(
                    GroupBuilder::new("kpis")
                        .base_delay(DelayDef::Secs(0.2))
                        .stagger(4)
                        .entity("revenue", EntityKind::MetricCard { value: 1280.0 })
                        .entity("users", EntityKind::MetricCard { value: 342.0 })
                        .build()?,
                )
                .build()?,
        )
        .scene(
            SceneBuilder::new("capacity")
                .group(
                    GroupBuilder::new("funders")
                        .base_delay(DelayDef::Frames(6))
                        .stagger(3)
                        .entity("north", EntityKind::Ring { current: 40.0, limit: 60.0 })
                        .entity("south", EntityKind::Bar { value: 9.0, max: 12.0 })
                        .build()?,
                )
                .build()?,
        )
        .build()?;

    for f in [0u64, 10, 30, 60, 119, 120, 150, 239] {
        let frame = Evaluator::eval_frame(&comp, FrameIndex(f))?;
        let Some(scene) = &frame.scene else {
            println!("frame {f}: nothing mounted");
            continue;
        };
        print!(
            "frame {f}: {} (opacity {:.3}, scale {:.3})",
            scene.label, scene.weight.opacity, scene.weight.scale_accent
        );
        for e in &scene.entities {
            print!(
                " | {} a={:.2} fill={:.2} value={:?}",
                e.id, e.props.opacity, e.props.fill_ratio, e.props.display_value
            );
        }
        println!();
    }

    Ok(())
}

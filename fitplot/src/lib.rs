pub use std::path::{Path, PathBuf};
use fitcore::*;

/// Text and JSON output of simulation results.
pub mod report {
    use super::*;
    use std::fs::File;
    use std::io::{BufWriter, Write};

    /// Legend entry of a strategy in a series plot.
    pub fn series_label(strategy: FitStrategy, avg: f64) -> String {
        format!("{}: {:.2}%", strategy, avg * 100.0)
    }

    /// Column caption of a strategy in a snapshot plot.
    pub fn snapshot_label(strategy: FitStrategy, rate: f64) -> String {
        format!("{}: {:.1}%", strategy, rate * 100.0)
    }

    pub fn to_json<T: Serialize>(val: &T) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(val)?)
    }

    pub fn write_json<T: Serialize>(val: &T, f: &Path) -> anyhow::Result<()> {
        let fd = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(f)?;
        let mut writer = BufWriter::new(fd);
        serde_json::to_writer_pretty(&mut writer, val)?;
        writeln!(&mut writer)?;

        Ok(())
    }

}

/// Pictures of simulation results.
pub mod plot {
    use plotters::prelude::*;
    use plotters::coord::Shift;
    use super::*;
    use std::path::Path;
    use super::report::{series_label, snapshot_label};

    const USED_COLOR:   RGBColor = RGBColor(127, 229, 178);
    const FREE_COLOR:   RGBColor = RGBColor(255, 229, 127);
    const PLACED_COLOR: RGBColor = RGBColor(102, 102, 229);
    /// Gap between consecutive requests in the requests column.
    const REQUEST_GAP:  ByteSteps = 20;

    // Drawing errors carry backend types that anyhow
    // can't always wrap; keep their description only.
    fn plot_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
        anyhow::anyhow!("Plotting failed: {:?}", e)
    }

    fn strategy_color(s: FitStrategy) -> RGBColor {
        match s {
            FitStrategy::First  => BLUE,
            FitStrategy::Best   => GREEN,
            FitStrategy::Worst  => RED,
        }
    }

    fn kind_color(k: RegionKind) -> RGBColor {
        match k {
            RegionKind::Used    => USED_COLOR,
            RegionKind::Free    => FREE_COLOR,
            RegionKind::Placed  => PLACED_COLOR,
        }
    }

    /// Success rate of every strategy against the trial index.
    pub fn plot_series(res: &TrialSeriesResult, f: &Path) -> anyhow::Result<()> {
        let n = res.num_trials();
        let backend = BitMapBackend::new(f, (1280, 720)).into_drawing_area();
        backend.fill(&WHITE).map_err(plot_err)?;
        let backend = backend.margin(10u32, 10u32, 10u32, 10u32);

        let mut chart = ChartBuilder::on(&backend)
                            .caption(
                                format!("Memory Allocation Simulation: {} Trials", n),
                                ("sans-serif", 24).into_font()
                            )
                            .x_label_area_size(40u32)
                            .y_label_area_size(60u32)
                            .build_cartesian_2d(0..n.max(2) - 1, 0f64..1.05f64)
                            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .x_desc("Trials")
            .y_desc("Success Rates")
            .draw()
            .map_err(plot_err)?;

        for (s, rates) in &res.series {
            let color = strategy_color(*s);
            chart.draw_series(LineSeries::new(
                    rates.iter().copied().enumerate(),
                    color.stroke_width(2)
                ))
                .map_err(plot_err)?
                .label(series_label(*s, res.averages[s]))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
        backend.present().map_err(plot_err)?;

        Ok(())
    }

    /// One column with the request list, then one column per strategy
    /// with the memory it ended up with. Address 0 is at the top.
    pub fn plot_snapshot(res: &SimulationResult, f: &Path) -> anyhow::Result<()> {
        let requests = stacked_requests(&res.requests);
        let extent = requests.last()
            .map_or(0, |r| r.end)
            .max(res.layout.memory_size) as f64;

        let backend = BitMapBackend::new(f, (1600, 900)).into_drawing_area();
        backend.fill(&WHITE).map_err(plot_err)?;
        let backend = backend.margin(10u32, 10u32, 10u32, 10u32);
        let columns = backend.split_evenly((1, 1 + res.outcomes.len()));

        draw_column(&columns[0], "Memory Requests", extent, requests.iter())?;
        for (area, (s, o)) in columns[1..].iter().zip(&res.outcomes) {
            draw_column(
                area,
                &snapshot_label(*s, o.success_rate),
                extent,
                res.layout.regions().chain(res.placed[s].iter())
            )?;
        }
        backend.present().map_err(plot_err)?;

        Ok(())
    }

    /// The request list as placed regions, stacked top to
    /// bottom with a gap before each one.
    pub fn stacked_requests(requests: &[ByteSteps]) -> Vec<Region> {
        let mut res = vec![];
        let mut addr = REQUEST_GAP;
        for &r in requests {
            res.push(Region::new(addr, addr + r, RegionKind::Placed));
            addr += r + REQUEST_GAP;
        }

        res
    }

    fn draw_column<'r, DB: DrawingBackend, I: Iterator<Item = &'r Region>>(
        area:       &DrawingArea<DB, Shift>,
        caption:    &str,
        extent:     f64,
        regions:    I,
    ) -> anyhow::Result<()> {
        let mut chart = ChartBuilder::on(area)
                            .caption(caption, ("sans-serif", 18).into_font())
                            .margin(5u32)
                            .build_cartesian_2d(0f64..1f64, 0f64..extent)
                            .map_err(plot_err)?;

        let mut rects = vec![];
        let mut texts = vec![];
        for r in regions {
            // Flip, so that addresses grow downwards.
            let top = extent - r.start as f64;
            let bottom = extent - r.end as f64;
            rects.push(Rectangle::new([(0.1, top), (0.9, bottom)], kind_color(r.kind).filled()));
            rects.push(Rectangle::new([(0.1, top), (0.9, bottom)], BLACK.stroke_width(1)));
            if r.kind == RegionKind::Placed {
                texts.push(Text::new(
                    format!("{}", r.capacity()),
                    (0.45, (top + bottom) / 2.0),
                    ("sans-serif", 12).into_font()
                ));
            }
        }
        chart.draw_series(rects).map_err(plot_err)?;
        chart.draw_series(texts).map_err(plot_err)?;

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn requests_stack_with_gaps() {
            assert_eq!(
                stacked_requests(&[30, 5, 12]),
                vec![
                    Region::new(20, 50, RegionKind::Placed),
                    Region::new(70, 75, RegionKind::Placed),
                    Region::new(95, 107, RegionKind::Placed),
                ]
            );
            assert!(stacked_requests(&[]).is_empty());
        }
    }
}

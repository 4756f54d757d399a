use crate::config::TimingConfig;
use crate::cue::Cue;
use crate::error::{BisubError, Result};

/// Smooth cue end-times against the next cue's start.
///
/// A cue followed by silence longer than `smoothing + min_gap` gains the
/// full `smoothing` tail; otherwise its end is clamped to `min_gap` before
/// the next cue's start. The last cue always gains the full tail. Raw
/// timestamps that leave no room for `min_gap` are a `CueCollision`.
pub fn smooth(cues: &mut [Cue], config: &TimingConfig) -> Result<()> {
    let count = cues.len();

    for i in 0..count {
        if i + 1 < count {
            let next_start = cues[i + 1].start_ms;
            let cue = &mut cues[i];
            let gap = next_start as i64 - cue.end_ms as i64;

            if gap > (config.smoothing_ms + config.min_gap_ms) as i64 {
                cue.end_ms += config.smoothing_ms;
            } else {
                let bounded = next_start as i64 - config.min_gap_ms as i64;
                if bounded < cue.start_ms as i64 {
                    return Err(BisubError::CueCollision(format!(
                        "cue {} cannot keep a {}ms gap before cue {}",
                        cue.index,
                        config.min_gap_ms,
                        cue.index + 1
                    )));
                }
                cue.end_ms = bounded as u64;
            }
        } else {
            cues[i].end_ms += config.smoothing_ms;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(index: usize, start_ms: u64, end_ms: u64) -> Cue {
        Cue {
            index,
            start_ms,
            end_ms,
            text_primary: format!("cue {index}"),
            text_secondary: None,
            words: Vec::new(),
        }
    }

    fn config() -> TimingConfig {
        TimingConfig { smoothing_ms: 300, min_gap_ms: 100 }
    }

    #[test]
    fn test_last_cue_gains_full_tail() {
        let mut cues = vec![cue(1, 0, 900)];
        smooth(&mut cues, &config()).unwrap();
        assert_eq!(cues[0].end_ms, 1200);
    }

    #[test]
    fn test_large_gap_pads_by_smoothing() {
        // Gap after cue 1 is 1100ms > 400ms.
        let mut cues = vec![cue(1, 0, 400), cue(2, 1500, 2600)];
        smooth(&mut cues, &config()).unwrap();
        assert_eq!(cues[0].end_ms, 700);
        assert_eq!(cues[1].end_ms, 2900);
    }

    #[test]
    fn test_tight_gap_clamps_to_min_gap() {
        // Gap 150ms <= 400ms: end becomes 1150 - 100 = 1050.
        let mut cues = vec![cue(1, 0, 1000), cue(2, 1150, 2000)];
        smooth(&mut cues, &config()).unwrap();
        assert_eq!(cues[0].end_ms, 1050);
    }

    #[test]
    fn test_boundary_gap_exactly_smoothing_plus_min_gap() {
        // Gap of exactly 400ms takes the clamping branch.
        let mut cues = vec![cue(1, 0, 1000), cue(2, 1400, 2000)];
        smooth(&mut cues, &config()).unwrap();
        assert_eq!(cues[0].end_ms, 1300);
    }

    #[test]
    fn test_overlapping_input_clamps_backwards() {
        // Raw input already closer than min_gap: the end regresses to keep
        // the separation invariant.
        let mut cues = vec![cue(1, 0, 1100), cue(2, 1150, 2000)];
        smooth(&mut cues, &config()).unwrap();
        assert_eq!(cues[0].end_ms, 1050);
    }

    #[test]
    fn test_collision_when_no_room_for_gap() {
        // next.start - min_gap lands before cue 1's start.
        let mut cues = vec![cue(1, 1000, 1100), cue(2, 1050, 2000)];
        let result = smooth(&mut cues, &config());
        assert!(matches!(result, Err(BisubError::CueCollision(_))));
    }

    #[test]
    fn test_separation_and_no_regression() {
        let mut cues = vec![
            cue(1, 0, 400),
            cue(2, 1500, 2600),
            cue(3, 2800, 3300),
            cue(4, 5000, 5400),
        ];
        let originals: Vec<u64> = cues.iter().map(|c| c.end_ms).collect();
        smooth(&mut cues, &config()).unwrap();

        let cfg = config();
        for pair in cues.windows(2) {
            assert!(pair[0].end_ms + cfg.min_gap_ms <= pair[1].start_ms);
            assert!(pair[0].end_ms < pair[1].start_ms);
        }
        // Ends never regress unless bounded by the next cue.
        for (smoothed, original) in cues.iter().zip(originals) {
            assert!(smoothed.end_ms >= original);
        }
    }

    #[test]
    fn test_empty_list_is_fine() {
        let mut cues: Vec<Cue> = Vec::new();
        smooth(&mut cues, &config()).unwrap();
    }
}

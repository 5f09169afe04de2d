use super::calibration::InterviewerCalibration;
use super::domain::Stage;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct CalibrationRow<'a> {
    interviewer: &'a str,
    interviews: usize,
    passes: usize,
    pass_rate: Option<u32>,
    phone_screens: usize,
    phone_screen_pass_rate: Option<u32>,
    second_rounds: usize,
    second_round_pass_rate: Option<u32>,
    final_rounds: usize,
    final_round_pass_rate: Option<u32>,
    alignment_sample: usize,
    alignment: Option<u32>,
}

impl<'a> CalibrationRow<'a> {
    fn from_calibration(calibration: &'a InterviewerCalibration) -> Self {
        let stage = |stage: Stage| {
            calibration
                .stage(stage)
                .map_or((0, None), |entry| (entry.interviews, entry.pass_rate.value()))
        };
        let (phone_screens, phone_screen_pass_rate) = stage(Stage::PhoneScreen);
        let (second_rounds, second_round_pass_rate) = stage(Stage::SecondRound);
        let (final_rounds, final_round_pass_rate) = stage(Stage::FinalRound);

        Self {
            interviewer: &calibration.name,
            interviews: calibration.interviews,
            passes: calibration.passes,
            pass_rate: calibration.pass_rate.value(),
            phone_screens,
            phone_screen_pass_rate,
            second_rounds,
            second_round_pass_rate,
            final_rounds,
            final_round_pass_rate,
            alignment_sample: calibration.alignment_sample,
            alignment: calibration.alignment.value(),
        }
    }
}

/// Writes one CSV row per interviewer, in the given order. Missing percentages are empty
/// cells.
pub fn write_calibration_csv<W: Write>(
    writer: W,
    calibrations: &[InterviewerCalibration],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for calibration in calibrations {
        csv_writer.serialize(CalibrationRow::from_calibration(calibration))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::calibration::StageCalibration;
    use crate::funnel::percent::percent_of;

    fn calibration() -> InterviewerCalibration {
        InterviewerCalibration {
            name: "Grace Hopper".to_string(),
            stages: Stage::ordered()
                .into_iter()
                .map(|stage| StageCalibration {
                    stage,
                    interviews: usize::from(stage == Stage::PhoneScreen) * 3,
                    passes: usize::from(stage == Stage::PhoneScreen) * 2,
                    pass_rate: if stage == Stage::PhoneScreen {
                        percent_of(2, 3)
                    } else {
                        percent_of(0, 0)
                    },
                })
                .collect(),
            interviews: 3,
            passes: 2,
            pass_rate: percent_of(2, 3),
            alignment_sample: 3,
            aligned: 1,
            alignment: percent_of(1, 3),
        }
    }

    #[test]
    fn rows_leave_inapplicable_rates_blank() {
        let mut buffer = Vec::new();

        write_calibration_csv(&mut buffer, &[calibration()]).expect("csv written");

        let output = String::from_utf8(buffer).expect("utf8");
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some(
                "interviewer,interviews,passes,pass_rate,phone_screens,phone_screen_pass_rate,\
                 second_rounds,second_round_pass_rate,final_rounds,final_round_pass_rate,\
                 alignment_sample,alignment"
            )
        );
        assert_eq!(lines.next(), Some("Grace Hopper,3,2,67,3,67,0,,0,,3,33"));
        assert_eq!(lines.next(), None);
    }
}

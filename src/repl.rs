use std::io::{BufRead, Write};

use crate::classifier::{EmotionPredictor, Prediction, Result};

pub const PROMPT: &str = "문장을 입력하세요 (종료하려면 'exit' 입력): ";
pub const EXIT_COMMAND: &str = "exit";
pub const GOODBYE: &str = "테스트를 종료합니다.";
pub const LOAD_NOTICE: &str = "학습된 모델이 존재합니다. 모델을 로드합니다.";

#[derive(Clone, Debug, PartialEq)]
pub enum LoopState {
    AwaitingInput,
    Predicting(String),
    Reporting { input: String, prediction: Prediction },
    Terminated,
}

pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Reads one line, dropping the terminator. `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

pub fn write_report<W: Write>(output: &mut W, input: &str, prediction: &Prediction) -> Result<()> {
    writeln!(output, "입력 문장: {input}")?;
    writeln!(output, "예측된 감정: {}", prediction.emotion)?;
    writeln!(output, "감정별 확률:")?;
    for (emotion, probability) in &prediction.probabilities {
        writeln!(output, " - {}: {:.2}%", emotion, probability * 100.0)?;
    }
    writeln!(output)?;
    Ok(())
}

/// Advances the loop by one state.
pub fn step<P, R, W>(state: LoopState, predictor: &P, input: &mut R, output: &mut W) -> Result<LoopState>
where
    P: EmotionPredictor + ?Sized,
    R: BufRead,
    W: Write,
{
    let next = match state {
        LoopState::AwaitingInput => {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            match read_line(input)? {
                Some(line) if !is_exit(&line) => LoopState::Predicting(line),
                _ => {
                    writeln!(output, "{GOODBYE}")?;
                    LoopState::Terminated
                }
            }
        }
        LoopState::Predicting(line) => {
            let prediction = predictor.predict(&line)?;
            LoopState::Reporting {
                input: line,
                prediction,
            }
        }
        LoopState::Reporting { input, prediction } => {
            write_report(output, &input, &prediction)?;
            LoopState::AwaitingInput
        }
        LoopState::Terminated => LoopState::Terminated,
    };
    Ok(next)
}

/// Runs until `exit` or end of input. Any prediction failure ends the loop.
pub fn run<P, R, W>(predictor: &P, mut input: R, mut output: W) -> Result<()>
where
    P: EmotionPredictor + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut state = LoopState::AwaitingInput;
    while state != LoopState::Terminated {
        state = step(state, predictor, &mut input, &mut output)?;
    }
    output.flush()?;
    Ok(())
}

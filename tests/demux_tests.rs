//! Properties of the thinking/answer demultiplexer over whole streams.

use geminius::{Channel, Chunk, Demultiplexer, Mode, Part};

fn run(chunks: &[Chunk]) -> Demultiplexer {
    let mut demux = Demultiplexer::new();
    for chunk in chunks {
        demux.accept(chunk);
    }
    demux
}

#[test]
fn short_trace_then_answer() {
    let demux = run(&[
        Chunk::from_texts(&["Let me think"]),
        Chunk::from_texts(&["...", "The answer is 4"]),
    ]);
    assert_eq!(demux.thinking(), "Let me think...");
    assert_eq!(demux.answer(), "The answer is 4");
    assert_eq!(demux.mode(), Mode::Answering);
}

#[test]
fn answer_continues_in_single_part_chunks() {
    let demux = run(&[
        Chunk::from_texts(&["step1"]),
        Chunk::from_texts(&["step2"]),
        Chunk::from_texts(&["step3", "final"]),
        Chunk::from_texts(&["-answer"]),
    ]);
    assert_eq!(demux.thinking(), "step1step2step3");
    assert_eq!(demux.answer(), "final-answer");
}

#[test]
fn empty_thinking_part_then_text() {
    let demux = run(&[Chunk::from_texts(&[""]), Chunk::from_texts(&["hi"])]);
    assert_eq!(demux.thinking(), "hi");
    assert_eq!(demux.answer(), "");
}

#[test]
fn single_part_stream_never_answers() {
    let chunks: Vec<Chunk> = ["a", "b", "c", "d"]
        .iter()
        .map(|t| Chunk::from_texts(&[*t]))
        .collect();
    let demux = run(&chunks);
    assert_eq!(demux.thinking(), "abcd");
    assert_eq!(demux.answer(), "");
    assert_eq!(demux.mode(), Mode::Thinking);
}

#[test]
fn split_at_every_position() {
    let texts = ["t0", "t1", "t2", "t3", "t4"];
    for k in 0..texts.len() {
        let mut chunks: Vec<Chunk> = texts[..k]
            .iter()
            .map(|t| Chunk::from_texts(&[*t]))
            .collect();
        chunks.push(Chunk::from_texts(&[texts[k], "a0", "a1"]));
        chunks.extend(
            ["a2", "a3"]
                .iter()
                .map(|t| Chunk::from_texts(&[*t])),
        );

        let demux = run(&chunks);
        let expected_thinking: String = texts[..=k].concat();
        assert_eq!(demux.thinking(), expected_thinking, "split at {k}");
        assert_eq!(demux.answer(), "a0a1a2a3", "split at {k}");
    }
}

#[test]
fn later_multi_part_chunks_stay_in_answer() {
    let demux = run(&[
        Chunk::from_texts(&["t", "a"]),
        Chunk::from_texts(&["b", "c"]),
        Chunk::from_texts(&["d"]),
    ]);
    assert_eq!(demux.thinking(), "t");
    assert_eq!(demux.answer(), "abcd");
}

#[test]
fn replay_is_deterministic() {
    let chunks = vec![
        Chunk::from_texts(&["x"]),
        Chunk::from_texts(&["y", "z"]),
        Chunk::from_texts(&["w"]),
    ];
    let first = run(&chunks);
    let second = run(&chunks);
    assert_eq!(first, second);
    assert_eq!(first.into_buffers(), ("xy".to_string(), "zw".to_string()));
}

#[test]
fn empty_first_part_still_transitions() {
    let mut demux = Demultiplexer::new();
    let chunk = Chunk::from_texts(&["", "hi"]);
    let updates = demux.accept(&chunk);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].channel, Channel::Answer);
    assert_eq!(updates[0].delta, "hi");
    assert_eq!(demux.thinking(), "");
    assert_eq!(demux.answer(), "hi");
    assert_eq!(demux.mode(), Mode::Answering);
}

#[test]
fn parts_without_text_count_toward_the_boundary() {
    let chunk = Chunk::new(vec![
        Part {
            text: None,
            thought: Some(true),
        },
        Part::text("answer"),
    ]);
    let demux = run(&[Chunk::from_texts(&["plan"]), chunk]);
    assert_eq!(demux.thinking(), "plan");
    assert_eq!(demux.answer(), "answer");
}

#[test]
fn chunks_without_parts_are_ignored() {
    let mut demux = Demultiplexer::new();
    assert!(demux.accept(&Chunk::default()).is_empty());
    assert_eq!(demux.mode(), Mode::Thinking);
    demux.accept(&Chunk::from_texts(&["t"]));
    assert!(demux.accept(&Chunk::default()).is_empty());
    assert_eq!(demux.thinking(), "t");
}

#[test]
fn updates_follow_append_order() {
    let mut demux = Demultiplexer::new();
    let chunk = Chunk::from_texts(&["end of thought", "first", "second"]);
    let updates: Vec<(Channel, String)> = demux
        .accept(&chunk)
        .into_iter()
        .map(|u| (u.channel, u.delta.to_string()))
        .collect();
    assert_eq!(
        updates,
        vec![
            (Channel::Thinking, "end of thought".to_string()),
            (Channel::Answer, "first".to_string()),
            (Channel::Answer, "second".to_string()),
        ]
    );
}

#[test]
fn failure_replaces_partial_output() {
    let mut demux = run(&[Chunk::from_texts(&["half", "way"])]);
    demux.fail("thinking failed".to_string(), "answer failed".to_string());
    assert_eq!(demux.thinking(), "thinking failed");
    assert_eq!(demux.answer(), "answer failed");
}

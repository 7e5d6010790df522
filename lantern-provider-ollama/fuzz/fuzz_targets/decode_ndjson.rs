#![no_main]
use lantern_provider_ollama::ChatDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The first byte picks a chunk size so line splits land everywhere.
    let Some((&split, body)) = data.split_first() else {
        return;
    };
    let size = usize::from(split).max(1);

    let mut decoder = ChatDecoder::new();
    let mut events = Vec::new();
    for chunk in body.chunks(size) {
        events.extend(decoder.push(chunk));
    }
    events.extend(decoder.finish());

    let terminals = events.iter().filter(|e| e.is_terminal()).count();
    assert_eq!(terminals, 1);
    assert!(events.last().is_some_and(lantern_types::StreamEvent::is_terminal));
});

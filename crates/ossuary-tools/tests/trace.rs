use ossuary_core::EntityId;
use ossuary_tools::{TraceEvent, TraceLog, TraceSink, Tracer, VecTraceSink};

#[test]
fn tracer_fans_out_to_log_and_sink() {
    struct Counting(std::rc::Rc<std::cell::Cell<usize>>);
    impl TraceSink for Counting {
        fn emit(&mut self, _event: TraceEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    let count = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut tracer = Tracer::new()
        .with_log()
        .with_sink(Box::new(Counting(count.clone())));

    tracer.emit(TraceEvent::new(1, "tree.success").with_entity(EntityId(4)));
    tracer.emit(TraceEvent::new(2, "tree.failure").with_entity(EntityId(4)));

    assert_eq!(count.get(), 2);
    let log = tracer.take_log().unwrap();
    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[0].a, 4);
    assert_eq!(tracer.log().unwrap().events.len(), 0);
}

#[test]
fn disabled_tracer_records_nothing() {
    let mut tracer = Tracer::new();
    assert!(!tracer.is_enabled());
    tracer.emit(TraceEvent::new(0, "x"));
    assert!(tracer.take_log().is_none());
}

#[test]
fn vec_sink_and_tag_filter() {
    let mut sink = VecTraceSink::default();
    sink.emit(TraceEvent::new(0, "a"));
    sink.emit(TraceEvent::new(1, "b").with_b(9));
    let log = TraceLog {
        events: sink.events,
    };
    let bs: Vec<_> = log.with_tag("b").collect();
    assert_eq!(bs.len(), 1);
    assert_eq!(bs[0].b, 9);
}

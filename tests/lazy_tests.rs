use sovran_optional::{AsyncLazy, Lazy};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Tool paths resolved on demand, the way a tool cache looks them up.
struct ToolCache {
    cmake: Lazy<String>,
    lookups: Cell<usize>,
}

impl ToolCache {
    fn cmake(&self) -> &str {
        self.cmake.get_lazy(|| {
            self.lookups.set(self.lookups.get() + 1);
            String::from("/usr/bin/cmake")
        })
    }
}

#[test]
fn test_lazy_computes_on_first_use_only() {
    let cache = ToolCache {
        cmake: Lazy::new(),
        lookups: Cell::new(0),
    };
    assert!(!cache.cmake.get().has_value());
    assert_eq!(cache.lookups.get(), 0);

    assert_eq!(cache.cmake(), "/usr/bin/cmake");
    assert_eq!(cache.cmake(), "/usr/bin/cmake");
    assert_eq!(cache.lookups.get(), 1);
    assert_eq!(cache.cmake.get(), String::from("/usr/bin/cmake"));
}

#[test]
fn test_async_lazy_runs_work_once_across_threads() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let baseline = AsyncLazy::spawn(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        vec!["zlib", "fmt"]
    });

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| assert_eq!(baseline.get().len(), 2));
        }
    });

    assert_eq!(baseline.get(), &["zlib", "fmt"]);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(baseline.is_ready());
}

#[test]
fn test_async_lazy_try_get_before_and_after_collection() {
    let (release, gate) = crossbeam_channel::bounded::<()>(1);
    let value = AsyncLazy::spawn(move || {
        let _ = gate.recv();
        42u32
    });

    assert!(!value.try_get().has_value());
    assert!(!value.is_ready());

    release.send(()).expect("worker is waiting");
    assert_eq!(*value.get(), 42);
    assert_eq!(value.try_get(), 42u32);
}

#[test]
#[should_panic(expected = "registry unreachable")]
fn test_async_lazy_reraises_worker_panic() {
    let failing: AsyncLazy<u32> = AsyncLazy::spawn(|| panic!("registry unreachable"));
    failing.get();
}

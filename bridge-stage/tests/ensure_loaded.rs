// Kept in its own test binary: ensure_loaded records process-wide state.

use std::cell::Cell;
use std::path::Path;

use bridge_stage::{
    Arch, EmbeddedSource, LIBRARY_X64, LibraryLoader, LoadError, ProvisionError, Provisioner,
};

#[derive(Default)]
struct CountingLoader {
    calls: Cell<usize>,
}

impl LibraryLoader for CountingLoader {
    fn load(&self, _path: &Path) -> Result<(), LoadError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

#[test]
fn test_ensure_loaded_is_one_time() {
    let loader = CountingLoader::default();
    let bundle = || EmbeddedSource::new().with(LIBRARY_X64, b"MZ-bridge");

    // A failed attempt is not remembered.
    let unusable = Provisioner::new(Vec::new(), Arch::X64, bundle(), &loader);
    assert!(bridge_stage::ensure_loaded(&unusable).is_err());
    assert_eq!(bridge_stage::loaded_library(), None);

    let dir = tempfile::tempdir().unwrap();
    let usable = Provisioner::new(vec![dir.path().to_path_buf()], Arch::X64, bundle(), &loader);
    let path = bridge_stage::ensure_loaded(&usable).expect("first load");
    assert_eq!(path, dir.path().join(LIBRARY_X64));
    assert_eq!(loader.calls.get(), 1);

    // Later calls neither stage nor load again, whatever provisioner they get.
    let again = bridge_stage::ensure_loaded(&unusable).expect("already loaded");
    assert_eq!(again, path);
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(bridge_stage::loaded_library(), Some(path.clone()));

    // The other architecture cannot piggyback on the loaded library.
    let other_arch = Provisioner::new(
        vec![dir.path().to_path_buf()],
        Arch::X86,
        EmbeddedSource::new(),
        &loader,
    );
    match bridge_stage::ensure_loaded(&other_arch) {
        Err(ProvisionError::ArchMismatch { loaded, requested }) => {
            assert_eq!(loaded, Arch::X64);
            assert_eq!(requested, Arch::X86);
        }
        other => panic!("expected ArchMismatch, got {:?}", other),
    }
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(bridge_stage::loaded_library(), Some(path));
}

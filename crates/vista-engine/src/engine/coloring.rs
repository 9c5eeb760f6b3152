/// Metadata about one data array of the loaded scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArrayInfo {
    pub name: String,
    pub components: usize,
    /// Range of the magnitude of the array values.
    pub range: [f64; 2],
}

/// Scene data the coloring-capable renderer colors by.
///
/// Implemented by the importer; the window only passes it through.
pub trait ColoringSource {
    /// Point (`cells == false`) or cell data arrays available for coloring.
    fn arrays(&self, cells: bool) -> Vec<DataArrayInfo>;
}

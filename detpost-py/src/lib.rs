//! Python bindings for the detpost post-processing library.
//!
//! Boxes cross the boundary as `(N, 4)` float32 arrays in corner form
//! (left, top, right, bottom), with parallel score and class id arrays.

use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use detpost::{
    DetPostError, Detection as RustDetection, Rect, SuppressConfig as RustSuppressConfig,
    Suppressor,
};

/// Convert a DetPostError to a Python exception.
fn to_py_err(err: DetPostError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// A surviving detection.
#[pyclass]
#[derive(Clone)]
pub struct Detection {
    /// Box as (left, top, right, bottom).
    #[pyo3(get)]
    pub rect: (f32, f32, f32, f32),
    /// Confidence score.
    #[pyo3(get)]
    pub score: f32,
    /// Class label.
    #[pyo3(get)]
    pub class_id: usize,
}

#[pymethods]
impl Detection {
    fn __repr__(&self) -> String {
        let (l, t, r, b) = self.rect;
        format!(
            "Detection(rect=({:.2}, {:.2}, {:.2}, {:.2}), score={:.4}, class_id={})",
            l, t, r, b, self.score, self.class_id
        )
    }
}

impl From<RustDetection> for Detection {
    fn from(d: RustDetection) -> Self {
        Self {
            rect: (d.rect.left, d.rect.top, d.rect.right, d.rect.bottom),
            score: d.score,
            class_id: d.class_id,
        }
    }
}

/// Configuration for the per-class suppression pipeline.
#[pyclass]
#[derive(Clone)]
pub struct SuppressConfig {
    inner: RustSuppressConfig,
}

#[pymethods]
impl SuppressConfig {
    /// Create a new SuppressConfig.
    ///
    /// Args:
    ///     iou_threshold: Boxes overlapping a kept box above this are dropped (default: 0.45)
    ///     num_classes: Size of the class label space (default: 80)
    ///     min_score: Optional confidence pre-filter (default: None)
    ///     parallel: Suppress classes in parallel (default: False)
    #[new]
    #[pyo3(signature = (iou_threshold = 0.45, num_classes = 80, min_score = None, parallel = false))]
    fn new(
        iou_threshold: f32,
        num_classes: usize,
        min_score: Option<f32>,
        parallel: bool,
    ) -> PyResult<Self> {
        let inner = RustSuppressConfig {
            iou_threshold,
            num_classes,
            min_score,
            parallel,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn __repr__(&self) -> String {
        format!(
            "SuppressConfig(iou_threshold={}, num_classes={}, min_score={:?}, parallel={})",
            self.inner.iou_threshold, self.inner.num_classes, self.inner.min_score, self.inner.parallel
        )
    }
}

fn collect_detections(
    boxes: &PyReadonlyArray2<'_, f32>,
    scores: &PyReadonlyArray1<'_, f32>,
    class_ids: Option<&PyReadonlyArray1<'_, i64>>,
) -> PyResult<Vec<RustDetection>> {
    let shape = boxes.shape();
    if shape[1] != 4 {
        return Err(PyValueError::new_err("boxes must have shape (N, 4)"));
    }
    let count = shape[0];
    let box_data = boxes.as_slice()?;
    let score_data = scores.as_slice()?;
    if score_data.len() != count {
        return Err(PyValueError::new_err("scores must have length N"));
    }
    let class_data = match class_ids {
        Some(ids) => {
            let ids = ids.as_slice()?;
            if ids.len() != count {
                return Err(PyValueError::new_err("class_ids must have length N"));
            }
            Some(ids)
        }
        None => None,
    };

    let mut out = Vec::with_capacity(count);
    for (idx, (corners, &score)) in box_data.chunks_exact(4).zip(score_data).enumerate() {
        let class_id = match class_data {
            Some(ids) => usize::try_from(ids[idx])
                .map_err(|_| PyValueError::new_err("class_ids must be non-negative"))?,
            None => 0,
        };
        let rect = Rect::new(corners[0], corners[1], corners[2], corners[3]);
        out.push(RustDetection::new(rect, score, class_id));
    }
    Ok(out)
}

/// Intersection-over-Union of two (left, top, right, bottom) boxes.
#[pyfunction]
fn iou(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> f32 {
    let a = Rect::new(a.0, a.1, a.2, a.3);
    let b = Rect::new(b.0, b.1, b.2, b.3);
    detpost::iou(&a, &b)
}

/// Greedy NMS over boxes of a single class.
///
/// Args:
///     boxes: float32 array of shape (N, 4)
///     scores: float32 array of shape (N,)
///     iou_threshold: Suppression threshold in [0, 1]
///
/// Returns:
///     List of Detection objects in descending score order
#[pyfunction]
fn suppress_class(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    iou_threshold: f32,
) -> PyResult<Vec<Detection>> {
    let candidates = collect_detections(&boxes, &scores, None)?;
    let cfg = RustSuppressConfig {
        iou_threshold,
        ..RustSuppressConfig::default()
    };
    cfg.validate().map_err(to_py_err)?;
    let kept = detpost::suppress_class(&candidates, iou_threshold);
    Ok(kept.into_iter().map(Detection::from).collect())
}

/// Per-class greedy NMS.
///
/// Args:
///     boxes: float32 array of shape (N, 4)
///     scores: float32 array of shape (N,)
///     class_ids: int64 array of shape (N,), each in [0, num_classes)
///     iou_threshold: Suppression threshold in [0, 1]
///     num_classes: Size of the class label space
///     min_score: Optional confidence pre-filter (default: None)
///     parallel: Suppress classes in parallel (default: False)
///
/// Returns:
///     List of Detection objects ordered by class, then descending score
#[pyfunction]
#[pyo3(signature = (boxes, scores, class_ids, iou_threshold, num_classes, min_score = None, parallel = false))]
#[allow(clippy::too_many_arguments)]
fn suppress_all_classes(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    class_ids: PyReadonlyArray1<'_, i64>,
    iou_threshold: f32,
    num_classes: usize,
    min_score: Option<f32>,
    parallel: bool,
) -> PyResult<Vec<Detection>> {
    let candidates = collect_detections(&boxes, &scores, Some(&class_ids))?;
    let cfg = RustSuppressConfig {
        iou_threshold,
        num_classes,
        min_score,
        parallel,
    };
    let suppressor = Suppressor::new(cfg).map_err(to_py_err)?;
    let kept = suppressor.run(&candidates).map_err(to_py_err)?;
    Ok(kept.into_iter().map(Detection::from).collect())
}

/// Runs per-class NMS with a prebuilt SuppressConfig.
///
/// Args:
///     boxes: float32 array of shape (N, 4)
///     scores: float32 array of shape (N,)
///     class_ids: int64 array of shape (N,)
///     config: SuppressConfig (default: SuppressConfig())
///
/// Returns:
///     List of Detection objects ordered by class, then descending score
#[pyfunction]
#[pyo3(signature = (boxes, scores, class_ids, config = None))]
fn suppress_with_config(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    class_ids: PyReadonlyArray1<'_, i64>,
    config: Option<SuppressConfig>,
) -> PyResult<Vec<Detection>> {
    let candidates = collect_detections(&boxes, &scores, Some(&class_ids))?;
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let suppressor = Suppressor::new(cfg).map_err(to_py_err)?;
    let kept = suppressor.run(&candidates).map_err(to_py_err)?;
    Ok(kept.into_iter().map(Detection::from).collect())
}

/// Python module for detpost.
#[pymodule]
fn _detpost(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Detection>()?;
    m.add_class::<SuppressConfig>()?;
    m.add_function(wrap_pyfunction!(iou, m)?)?;
    m.add_function(wrap_pyfunction!(suppress_class, m)?)?;
    m.add_function(wrap_pyfunction!(suppress_all_classes, m)?)?;
    m.add_function(wrap_pyfunction!(suppress_with_config, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

//! Typed filter commands.
//!
//! A command line such as `blur koala koala-blur split 50` is parsed once at
//! the boundary into a [`Command`] that carries typed fields. Execution then
//! works against an [`ImageStore`]: every source is fetched and every
//! parameter validated before anything is written, so a failing command
//! leaves the store untouched.
//!
//! The set of commands is closed; [`CommandKind`] is the registry.
//!
//! ```text
//! <component> SRC DST [split P]       component: red|green|blue|luma|intensity|value
//! horizontal-flip SRC DST             vertical-flip SRC DST
//! brighten K SRC DST
//! rgb-split SRC R G B                 rgb-combine DST R G B
//! blur|sharpen|sepia SRC DST [split P]
//! histogram SRC DST                   color-correct SRC DST [split P]
//! levels-adjust B M W SRC DST [split P]
//! compress P SRC DST                  downscale W H SRC DST
//! dither SRC DST [split P]
//! ```
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, ImageStore, MemoryStore, Pixel};
//! use ime_ops::Command;
//!
//! let mut store = MemoryStore::new();
//! store.store("img", Image::filled(2, 2, Pixel::gray(100, 255)).unwrap());
//!
//! let cmd = Command::parse(&["brighten", "10", "img", "bright"]).unwrap();
//! cmd.execute(&mut store).unwrap();
//! assert_eq!(store.fetch("bright").unwrap().pixel(0, 0).r, 110);
//! ```

use std::fmt;
use std::str::FromStr;

use ime_core::{Image, ImageStore};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use crate::channels::{rgb_combine, rgb_split};
use crate::color_correct::color_correct;
use crate::components::{Component, brighten, extract, sepia};
use crate::compress::{CompressionPercent, haar_compress};
use crate::dither::dither;
use crate::filter::{Kernel, convolve};
use crate::histogram::{Histogram, render};
use crate::levels::{LevelsCurve, levels_adjust};
use crate::resize::downscale;
use crate::split::SplitPercent;
use crate::transform::{flip_horizontal, flip_vertical};
use crate::{OpsError, OpsResult};

const SPLIT_KEYWORD: &str = "split";

/// Names of every filter command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `red-component`
    RedComponent,
    /// `green-component`
    GreenComponent,
    /// `blue-component`
    BlueComponent,
    /// `luma-component`
    LumaComponent,
    /// `intensity-component`
    IntensityComponent,
    /// `value-component`
    ValueComponent,
    /// `horizontal-flip`
    HorizontalFlip,
    /// `vertical-flip`
    VerticalFlip,
    /// `brighten`
    Brighten,
    /// `rgb-split`
    RgbSplit,
    /// `rgb-combine`
    RgbCombine,
    /// `blur`
    Blur,
    /// `sharpen`
    Sharpen,
    /// `sepia`
    Sepia,
    /// `histogram`
    Histogram,
    /// `color-correct`
    ColorCorrect,
    /// `levels-adjust`
    LevelsAdjust,
    /// `compress`
    Compress,
    /// `downscale`
    Downscale,
    /// `dither`
    Dither,
}

impl CommandKind {
    /// Every command, in registry order.
    pub const ALL: [CommandKind; 20] = [
        CommandKind::RedComponent,
        CommandKind::GreenComponent,
        CommandKind::BlueComponent,
        CommandKind::LumaComponent,
        CommandKind::IntensityComponent,
        CommandKind::ValueComponent,
        CommandKind::HorizontalFlip,
        CommandKind::VerticalFlip,
        CommandKind::Brighten,
        CommandKind::RgbSplit,
        CommandKind::RgbCombine,
        CommandKind::Blur,
        CommandKind::Sharpen,
        CommandKind::Sepia,
        CommandKind::Histogram,
        CommandKind::ColorCorrect,
        CommandKind::LevelsAdjust,
        CommandKind::Compress,
        CommandKind::Downscale,
        CommandKind::Dither,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::RedComponent => "red-component",
            CommandKind::GreenComponent => "green-component",
            CommandKind::BlueComponent => "blue-component",
            CommandKind::LumaComponent => "luma-component",
            CommandKind::IntensityComponent => "intensity-component",
            CommandKind::ValueComponent => "value-component",
            CommandKind::HorizontalFlip => "horizontal-flip",
            CommandKind::VerticalFlip => "vertical-flip",
            CommandKind::Brighten => "brighten",
            CommandKind::RgbSplit => "rgb-split",
            CommandKind::RgbCombine => "rgb-combine",
            CommandKind::Blur => "blur",
            CommandKind::Sharpen => "sharpen",
            CommandKind::Sepia => "sepia",
            CommandKind::Histogram => "histogram",
            CommandKind::ColorCorrect => "color-correct",
            CommandKind::LevelsAdjust => "levels-adjust",
            CommandKind::Compress => "compress",
            CommandKind::Downscale => "downscale",
            CommandKind::Dither => "dither",
        }
    }

    /// Looks a command up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Argument synopsis, without the command name.
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::RgbSplit => "SRC RED GREEN BLUE",
            CommandKind::RgbCombine => "DST RED GREEN BLUE",
            CommandKind::Brighten => "INCREMENT SRC DST",
            CommandKind::Compress => "PERCENT SRC DST",
            CommandKind::Downscale => "WIDTH HEIGHT SRC DST",
            CommandKind::LevelsAdjust => "BLACK MID WHITE SRC DST [split PERCENT]",
            CommandKind::HorizontalFlip | CommandKind::VerticalFlip | CommandKind::Histogram => {
                "SRC DST"
            }
            _ => "SRC DST [split PERCENT]",
        }
    }

    /// Whether the command accepts a trailing `split P`.
    pub fn supports_split(self) -> bool {
        self.usage().ends_with("[split PERCENT]")
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandKind {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        Self::from_name(s).ok_or_else(|| OpsError::UnknownCommand(s.to_string()))
    }
}

/// Validated black, mid and white points of a levels adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelsPoints {
    /// Black point
    pub black: i32,
    /// Mid point
    pub mid: i32,
    /// White point
    pub white: i32,
    /// Curve fitted through the points
    pub curve: LevelsCurve,
}

impl LevelsPoints {
    /// Validates the points and fits the curve.
    pub fn new(black: i32, mid: i32, white: i32) -> OpsResult<Self> {
        let curve = LevelsCurve::fit(black, mid, white)?;
        Ok(Self {
            black,
            mid,
            white,
            curve,
        })
    }
}

/// A parsed filter invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Grayscale rendering of one component.
    Component {
        /// Which component
        component: Component,
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// Left-right mirror.
    HorizontalFlip {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Top-bottom mirror.
    VerticalFlip {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Add a constant to R, G and B.
    Brighten {
        /// Value added, in `(-255, 255)`
        increment: i32,
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Three grayscale channel images.
    RgbSplit {
        /// Source image
        src: String,
        /// Destination of the red channel
        red: String,
        /// Destination of the green channel
        green: String,
        /// Destination of the blue channel
        blue: String,
    },
    /// Recombine three channel images.
    RgbCombine {
        /// Destination image
        dst: String,
        /// Red channel source
        red: String,
        /// Green channel source
        green: String,
        /// Blue channel source
        blue: String,
    },
    /// 3x3 blur.
    Blur {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// 5x5 sharpen.
    Sharpen {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// Sepia tone.
    Sepia {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// Histogram chart.
    Histogram {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Peak-aligning color correction.
    ColorCorrect {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// Quadratic levels adjustment.
    LevelsAdjust {
        /// Black, mid and white points
        points: LevelsPoints,
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
    /// Haar wavelet compression.
    Compress {
        /// Share of coefficients discarded
        percent: CompressionPercent,
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Bilinear downscale.
    Downscale {
        /// Target width
        width: usize,
        /// Target height
        height: usize,
        /// Source image
        src: String,
        /// Destination image
        dst: String,
    },
    /// Floyd-Steinberg dithering.
    Dither {
        /// Source image
        src: String,
        /// Destination image
        dst: String,
        /// Split view
        split: SplitPercent,
    },
}

/// Positional tokens after the command name.
struct Args<'a> {
    kind: CommandKind,
    tokens: Vec<&'a str>,
}

impl<'a> Args<'a> {
    fn arity_error(&self) -> OpsError {
        OpsError::invalid(format!(
            "{} expects: {} {}",
            self.kind,
            self.kind,
            self.kind.usage()
        ))
    }

    /// Checks arity, accepting a trailing `split P` when the command allows it.
    fn expect(&self, positional: usize) -> OpsResult<SplitPercent> {
        let n = self.tokens.len();
        if n == positional {
            return Ok(SplitPercent::FULL);
        }
        if self.kind.supports_split() && n == positional + 2 {
            if self.tokens[positional] != SPLIT_KEYWORD {
                return Err(OpsError::invalid(format!(
                    "expected '{SPLIT_KEYWORD}', got '{}'",
                    self.tokens[positional]
                )));
            }
            return self.tokens[positional + 1].parse();
        }
        Err(self.arity_error())
    }

    fn name(&self, i: usize) -> String {
        self.tokens[i].to_string()
    }

    fn int(&self, i: usize, what: &str) -> OpsResult<i64> {
        self.tokens[i]
            .parse()
            .map_err(|_| OpsError::invalid(format!("{what} must be an integer, got '{}'", self.tokens[i])))
    }

    fn int32(&self, i: usize, what: &str) -> OpsResult<i32> {
        let v = self.int(i, what)?;
        i32::try_from(v).map_err(|_| OpsError::invalid(format!("{what} out of range: {v}")))
    }

    fn component(&self, component: Component) -> OpsResult<Command> {
        let split = self.expect(2)?;
        Ok(Command::Component {
            component,
            src: self.name(0),
            dst: self.name(1),
            split,
        })
    }

    fn dimension(&self, i: usize, what: &str) -> OpsResult<usize> {
        let v = self.int(i, what)?;
        usize::try_from(v).map_err(|_| OpsError::invalid(format!("{what} cannot be negative: {v}")))
    }
}

impl Command {
    /// Parses a token list whose first token is the command name.
    ///
    /// # Errors
    ///
    /// - [`OpsError::UnknownCommand`] for a name missing from the registry
    /// - [`OpsError::InvalidArgument`] for wrong arity, malformed numbers or
    ///   out-of-range values
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> OpsResult<Self> {
        let (head, rest) = tokens
            .split_first()
            .ok_or_else(|| OpsError::invalid("empty command"))?;
        let kind: CommandKind = head.as_ref().parse()?;
        let args = Args {
            kind,
            tokens: rest.iter().map(AsRef::as_ref).collect(),
        };
        trace!(%kind, args = args.tokens.len(), "parse command");

        let cmd = match kind {
            CommandKind::RedComponent => args.component(Component::Red)?,
            CommandKind::GreenComponent => args.component(Component::Green)?,
            CommandKind::BlueComponent => args.component(Component::Blue)?,
            CommandKind::LumaComponent => args.component(Component::Luma)?,
            CommandKind::IntensityComponent => args.component(Component::Intensity)?,
            CommandKind::ValueComponent => args.component(Component::Value)?,
            CommandKind::HorizontalFlip => {
                args.expect(2)?;
                Command::HorizontalFlip {
                    src: args.name(0),
                    dst: args.name(1),
                }
            }
            CommandKind::VerticalFlip => {
                args.expect(2)?;
                Command::VerticalFlip {
                    src: args.name(0),
                    dst: args.name(1),
                }
            }
            CommandKind::Brighten => {
                args.expect(3)?;
                let increment = args.int32(0, "increment")?;
                if increment <= -255 || increment >= 255 {
                    return Err(OpsError::invalid(format!(
                        "brighten increment must be between -254 and 254, got {increment}"
                    )));
                }
                Command::Brighten {
                    increment,
                    src: args.name(1),
                    dst: args.name(2),
                }
            }
            CommandKind::RgbSplit => {
                args.expect(4)?;
                Command::RgbSplit {
                    src: args.name(0),
                    red: args.name(1),
                    green: args.name(2),
                    blue: args.name(3),
                }
            }
            CommandKind::RgbCombine => {
                args.expect(4)?;
                Command::RgbCombine {
                    dst: args.name(0),
                    red: args.name(1),
                    green: args.name(2),
                    blue: args.name(3),
                }
            }
            CommandKind::Blur => {
                let split = args.expect(2)?;
                Command::Blur {
                    src: args.name(0),
                    dst: args.name(1),
                    split,
                }
            }
            CommandKind::Sharpen => {
                let split = args.expect(2)?;
                Command::Sharpen {
                    src: args.name(0),
                    dst: args.name(1),
                    split,
                }
            }
            CommandKind::Sepia => {
                let split = args.expect(2)?;
                Command::Sepia {
                    src: args.name(0),
                    dst: args.name(1),
                    split,
                }
            }
            CommandKind::Histogram => {
                args.expect(2)?;
                Command::Histogram {
                    src: args.name(0),
                    dst: args.name(1),
                }
            }
            CommandKind::ColorCorrect => {
                let split = args.expect(2)?;
                Command::ColorCorrect {
                    src: args.name(0),
                    dst: args.name(1),
                    split,
                }
            }
            CommandKind::LevelsAdjust => {
                let split = args.expect(5)?;
                let points = LevelsPoints::new(
                    args.int32(0, "black point")?,
                    args.int32(1, "mid point")?,
                    args.int32(2, "white point")?,
                )?;
                Command::LevelsAdjust {
                    points,
                    src: args.name(3),
                    dst: args.name(4),
                    split,
                }
            }
            CommandKind::Compress => {
                args.expect(3)?;
                Command::Compress {
                    percent: CompressionPercent::new(args.int(0, "compression percent")?)?,
                    src: args.name(1),
                    dst: args.name(2),
                }
            }
            CommandKind::Downscale => {
                args.expect(4)?;
                Command::Downscale {
                    width: args.dimension(0, "target width")?,
                    height: args.dimension(1, "target height")?,
                    src: args.name(2),
                    dst: args.name(3),
                }
            }
            CommandKind::Dither => {
                let split = args.expect(2)?;
                Command::Dither {
                    src: args.name(0),
                    dst: args.name(1),
                    split,
                }
            }
        };
        Ok(cmd)
    }

    /// The registry entry of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Component { component, .. } => match component {
                Component::Red => CommandKind::RedComponent,
                Component::Green => CommandKind::GreenComponent,
                Component::Blue => CommandKind::BlueComponent,
                Component::Luma => CommandKind::LumaComponent,
                Component::Intensity => CommandKind::IntensityComponent,
                Component::Value => CommandKind::ValueComponent,
            },
            Command::HorizontalFlip { .. } => CommandKind::HorizontalFlip,
            Command::VerticalFlip { .. } => CommandKind::VerticalFlip,
            Command::Brighten { .. } => CommandKind::Brighten,
            Command::RgbSplit { .. } => CommandKind::RgbSplit,
            Command::RgbCombine { .. } => CommandKind::RgbCombine,
            Command::Blur { .. } => CommandKind::Blur,
            Command::Sharpen { .. } => CommandKind::Sharpen,
            Command::Sepia { .. } => CommandKind::Sepia,
            Command::Histogram { .. } => CommandKind::Histogram,
            Command::ColorCorrect { .. } => CommandKind::ColorCorrect,
            Command::LevelsAdjust { .. } => CommandKind::LevelsAdjust,
            Command::Compress { .. } => CommandKind::Compress,
            Command::Downscale { .. } => CommandKind::Downscale,
            Command::Dither { .. } => CommandKind::Dither,
        }
    }

    /// Images read by the command.
    pub fn sources(&self) -> Vec<&str> {
        match self {
            Command::RgbCombine {
                red, green, blue, ..
            } => vec![red, green, blue],
            Command::Component { src, .. }
            | Command::HorizontalFlip { src, .. }
            | Command::VerticalFlip { src, .. }
            | Command::Brighten { src, .. }
            | Command::RgbSplit { src, .. }
            | Command::Blur { src, .. }
            | Command::Sharpen { src, .. }
            | Command::Sepia { src, .. }
            | Command::Histogram { src, .. }
            | Command::ColorCorrect { src, .. }
            | Command::LevelsAdjust { src, .. }
            | Command::Compress { src, .. }
            | Command::Downscale { src, .. }
            | Command::Dither { src, .. } => vec![src],
        }
    }

    /// Images written by the command.
    pub fn destinations(&self) -> Vec<&str> {
        match self {
            Command::RgbSplit {
                red, green, blue, ..
            } => vec![red, green, blue],
            Command::Component { dst, .. }
            | Command::HorizontalFlip { dst, .. }
            | Command::VerticalFlip { dst, .. }
            | Command::Brighten { dst, .. }
            | Command::RgbCombine { dst, .. }
            | Command::Blur { dst, .. }
            | Command::Sharpen { dst, .. }
            | Command::Sepia { dst, .. }
            | Command::Histogram { dst, .. }
            | Command::ColorCorrect { dst, .. }
            | Command::LevelsAdjust { dst, .. }
            | Command::Compress { dst, .. }
            | Command::Downscale { dst, .. }
            | Command::Dither { dst, .. } => vec![dst],
        }
    }

    /// Computes the command's outputs from the images in `store`.
    ///
    /// Returns `(destination, image)` pairs; nothing is written.
    pub fn evaluate<S: ImageStore + ?Sized>(&self, store: &S) -> OpsResult<Vec<(String, Image)>> {
        let sources = self
            .sources()
            .into_iter()
            .map(|name| store.fetch(name))
            .collect::<ime_core::Result<Vec<&Image>>>()?;
        let src = sources[0];

        let single = |dst: &String, img: Image| -> OpsResult<Vec<(String, Image)>> {
            Ok(vec![(dst.clone(), img)])
        };

        match self {
            Command::Component {
                component,
                dst,
                split,
                ..
            } => single(dst, extract(src, *component, *split)),
            Command::HorizontalFlip { dst, .. } => single(dst, flip_horizontal(src)),
            Command::VerticalFlip { dst, .. } => single(dst, flip_vertical(src)),
            Command::Brighten { increment, dst, .. } => single(dst, brighten(src, *increment)?),
            Command::RgbSplit {
                red, green, blue, ..
            } => {
                let [r, g, b] = rgb_split(src);
                Ok(vec![(red.clone(), r), (green.clone(), g), (blue.clone(), b)])
            }
            Command::RgbCombine { dst, .. } => {
                single(dst, rgb_combine(sources[0], sources[1], sources[2])?)
            }
            Command::Blur { dst, split, .. } => single(dst, convolve(src, &Kernel::blur(), *split)),
            Command::Sharpen { dst, split, .. } => {
                single(dst, convolve(src, &Kernel::sharpen(), *split))
            }
            Command::Sepia { dst, split, .. } => single(dst, sepia(src, *split)),
            Command::Histogram { dst, .. } => single(dst, render(&Histogram::of(src))?),
            Command::ColorCorrect { dst, split, .. } => single(dst, color_correct(src, *split)),
            Command::LevelsAdjust {
                points, dst, split, ..
            } => single(dst, levels_adjust(src, &points.curve, *split)),
            Command::Compress { percent, dst, .. } => single(dst, haar_compress(src, *percent)),
            Command::Downscale {
                width, height, dst, ..
            } => single(dst, downscale(src, *width, *height)?),
            Command::Dither { dst, split, .. } => single(dst, dither(src, *split)?),
        }
    }

    /// Runs the command and stores its outputs.
    ///
    /// All outputs are computed before the first write.
    pub fn execute<S: ImageStore + ?Sized>(&self, store: &mut S) -> OpsResult<()> {
        let outputs = self.evaluate(store)?;
        for (name, image) in outputs {
            debug!(command = %self.kind(), dst = %name, w = image.width(), h = image.height(), "store result");
            store.store(&name, image);
        }
        Ok(())
    }
}

impl FromStr for Command {
    type Err = OpsError;

    fn from_str(line: &str) -> OpsResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Command::parse(&tokens)
    }
}

/// Parses `tokens` and runs the command against `store`.
pub fn execute<S, T>(tokens: &[T], store: &mut S) -> OpsResult<()>
where
    S: ImageStore + ?Sized,
    T: AsRef<str>,
{
    Command::parse(tokens)?.execute(store)
}

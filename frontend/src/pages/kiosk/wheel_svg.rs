use std::f64::consts::PI;

use kiosk_shared::shared_spin_wheel::label_lines;
use kiosk_shared::Wedge;
use yew::prelude::*;
use crate::styles;

const RADIUS: f64 = 100.0;
const LABEL_RADIUS: f64 = 64.0;
const IMAGE_RADIUS: f64 = 84.0;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub wedges: Vec<Wedge>,
    pub rotation: f64,
    pub spin_ms: u64,
    pub caption: AttrValue,
}

fn point(angle_deg: f64, radius: f64) -> (f64, f64) {
    let radians = angle_deg * PI / 180.0;
    (radius * radians.cos(), radius * radians.sin())
}

// Wedge 0 is centred under the pointer at the top.
fn wedge_path(index: usize, count: usize) -> String {
    let span = 360.0 / count as f64;
    let start = index as f64 * span - 90.0 - span / 2.0;
    let (x1, y1) = point(start, RADIUS);
    let (x2, y2) = point(start + span, RADIUS);
    format!("M 0 0 L {:.3} {:.3} A {r} {r} 0 0 1 {:.3} {:.3} Z", x1, y1, x2, y2, r = RADIUS)
}

#[function_component(WheelSvg)]
pub fn wheel_svg(props: &Props) -> Html {
    let count = props.wedges.len().max(1);
    let span = 360.0 / count as f64;
    let spin_style = format!(
        "transform: rotate({}deg); transition: transform {}ms cubic-bezier(0.17, 0.67, 0.12, 0.99);",
        props.rotation, props.spin_ms
    );

    html! {
        <div class={styles::WHEEL_CONTAINER}>
            <div class={styles::WHEEL_POINTER}>{"▼"}</div>
            <div style={spin_style}>
                <svg viewBox="-105 -105 210 210" xmlns="http://www.w3.org/2000/svg">
                    <circle cx="0" cy="0" r="103" fill="#1f2937" />
                    { for props.wedges.iter().enumerate().map(|(index, wedge)| {
                        let fill = styles::WHEEL_COLORS[index % 2];
                        let text_fill = styles::WHEEL_TEXT_COLORS[index % 2];
                        let turn = format!("rotate({})", index as f64 * span);
                        let (first, second) = label_lines(&wedge.label);
                        html! {
                            <g>
                                <path d={wedge_path(index, count)} fill={fill} stroke="#111827" stroke-width="0.6" />
                                <g transform={turn}>
                                    <text x="0" y={format!("{}", -LABEL_RADIUS)} fill={text_fill} font-size="7" font-weight="800" text-anchor="middle">
                                        {first}
                                    </text>
                                    if let Some(second) = second {
                                        <text x="0" y={format!("{}", -LABEL_RADIUS + 8.0)} fill={text_fill} font-size="6" font-weight="700" text-anchor="middle">
                                            {second}
                                        </text>
                                    }
                                    if let Some(url) = wedge.image_url.clone() {
                                        <image href={url} x="-8" y={format!("{}", -IMAGE_RADIUS - 8.0)} width="16" height="16" />
                                    }
                                </g>
                            </g>
                        }
                    }) }
                    <circle cx="0" cy="0" r="12" fill="#fbbf24" stroke="#111827" stroke-width="1" />
                </svg>
            </div>
            <p class={styles::WHEEL_CAPTION}>{props.caption.clone()}</p>
        </div>
    }
}

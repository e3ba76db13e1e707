use std::fs;

fn main() -> std::io::Result<()> {
  println!("Packing wasm into single HTML file");
  println!("Javascript input: <- pkg/rooftrace_wasm.js");
  let javascript = fs::read_to_string("pkg/rooftrace_wasm.js")?;
  println!("Wasm module:      <- pkg/rooftrace_wasm_bg.wasm");
  let module = fs::read("pkg/rooftrace_wasm_bg.wasm")?;
  let encoded = base64::encode(module);

  println!("Html result:      -> rooftrace.html");
  fs::write(
    "rooftrace.html",
    HTML_TEMPLATE
      .replace("JAVASCRIPT", &javascript)
      .replace("WASM_MODULE", &encoded),
  )?;
  Ok(())
}

static HTML_TEMPLATE: &'static str = r###"
<html>

<head>
  <meta content="text/html;charset=utf-8" http-equiv="Content-Type" />
  <style type="text/css">
    * {
      box-sizing: border-box;
    }

    body {
      margin: 1em;
    }

    canvas {
      border: 1px solid black;
    }

    .button-container {
      margin-top: 0.5em;
    }
  </style>
</head>

<body>
  <noscript>
    This interactive widget cannot run without JavaScript. Sorry.
  </noscript>
  <div>
    <canvas id="canvas" width="900" height="550">
      This interactive widget cannot run without canvas support. Sorry.
    </canvas>
  </div>
  <div>
    <div class="button-container">
      <button id="reset" class="reset-button">Reset</button>
      <button id="export">Export Image</button>
    </div>
    <p>
      <b>Note:</b> Select the corners of the shape you wish to outline. The
      shape will be automatically adjusted based on the selected points.
    </p>
  </div>
  <script type="module">


    JAVASCRIPT

    async function run() {
      const data = "data:application/wasm;base64,WASM_MODULE";
      // Support both --target=web and --target=no-modules
      if( typeof(init) !== 'undefined' ) {
        await init(data);
      } else {
        await wasm_bindgen(data);
      }
    }

    run();
  </script>
</body>

</html>
"###;
